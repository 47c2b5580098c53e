// Required ports - interfaces the host test suite implements
use crate::level::Level;

/// Terminal output behind a console's stock bindings.
///
/// The console hands implementations fully resolved messages; they own the
/// actual I/O. The crate ships [`LogSink`](crate::console::LogSink), which emits
/// through the `log` facade; suites wanting full isolation supply a recording
/// client instead.
pub trait SinkClient: Send {
    /// Emit one resolved message on `level`.
    fn emit(&mut self, level: Level, message: &str);
}
