pub mod common;
pub mod console;
pub mod interceptor;
pub mod level;
pub mod manifest;
pub mod pattern;
pub mod ports;

pub use common::{LogFormat, Placeholder};
pub use console::{Console, LogSink};
pub use interceptor::{Counter, Counts, Interceptor};
pub use level::Level;
pub use manifest::Manifest;
pub use pattern::Pattern;

pub use ports::provided::Console as ConsoleTrait;
pub use ports::required::SinkClient;

pub use ports::provided::{Binding, KeyError, ManifestError, PatternError};
