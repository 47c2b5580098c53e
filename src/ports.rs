// Ports - the boundary between this crate and the host test suite

pub mod provided;
pub mod required;

pub use provided::*;
pub use required::*;
