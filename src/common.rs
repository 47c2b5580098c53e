// Common utilities

pub mod log_format;
pub mod placeholder;

pub use log_format::LogFormat;
pub use placeholder::Placeholder;
