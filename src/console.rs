use crate::common::Placeholder;
use crate::fn_log;
use crate::level::Level;
use crate::ports::provided::{self, Binding};
use crate::ports::required::SinkClient;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// The shared logging object made explicit: one rebindable binding per level.
///
/// Stock bindings resolve `%s` placeholders and emit the result through one
/// shared [`SinkClient`]; [`Console::new`] wires every level to [`LogSink`], so
/// messages surface through the `log` facade. Interceptors swap a level's
/// binding out via [`rebind`](Console::rebind) and put it back on restore.
///
/// # Examples
///
/// ```
/// use console_intercept::{Console, Level, SinkClient};
/// use serde_json::json;
/// use std::sync::{Arc, Mutex};
///
/// #[derive(Clone, Default)]
/// struct Capture(Arc<Mutex<Vec<String>>>);
/// impl SinkClient for Capture {
///     fn emit(&mut self, _level: Level, message: &str) {
///         self.0.lock().unwrap().push(message.to_string());
///     }
/// }
///
/// let capture = Capture::default();
/// let mut console = Console::with_client(capture.clone());
/// console.error("disk %s is full", &[json!("/dev/sda1")]);
///
/// assert_eq!(capture.0.lock().unwrap().as_slice(), ["disk /dev/sda1 is full"]);
/// ```
pub struct Console {
    bindings: HashMap<Level, Binding>,
}

impl Console {
    /// Console with every level emitting through the `log` facade.
    pub fn new() -> Self {
        Self::with_client(LogSink)
    }

    /// Console with every level emitting through `client`.
    pub fn with_client<C: SinkClient + 'static>(client: C) -> Self {
        let client: Arc<Mutex<dyn SinkClient>> = Arc::new(Mutex::new(client));
        let mut bindings: HashMap<Level, Binding> = HashMap::new();

        for level in Level::ALL {
            let client = Arc::clone(&client);
            let stock: Binding = Box::new(move |message: &str, args: &[Value]| {
                let resolved = Placeholder::resolve(message, args);
                client.lock().unwrap().emit(level, &resolved);
            });
            bindings.insert(level, stock);
        }

        Self { bindings }
    }

    /// Invoke the current binding for `level` with a message and its
    /// positional substitution arguments.
    pub fn log(&mut self, level: Level, message: &str, args: &[Value]) {
        fn_log!("Console", "log", level.as_str(), message);

        if let Some(binding) = self.bindings.get_mut(&level) {
            binding(message, args);
        }
    }

    pub fn error(&mut self, message: &str, args: &[Value]) {
        self.log(Level::Error, message, args);
    }

    pub fn warn(&mut self, message: &str, args: &[Value]) {
        self.log(Level::Warn, message, args);
    }

    pub fn info(&mut self, message: &str, args: &[Value]) {
        self.log(Level::Info, message, args);
    }

    pub fn debug(&mut self, message: &str, args: &[Value]) {
        self.log(Level::Debug, message, args);
    }

    pub fn trace(&mut self, message: &str, args: &[Value]) {
        self.log(Level::Trace, message, args);
    }

    /// Installs `binding` for `level`, returning the binding it displaced.
    pub fn rebind(&mut self, level: Level, binding: Binding) -> Binding {
        fn_log!("Console", "rebind", level.as_str());

        // Every level is bound at construction
        self.bindings.insert(level, binding).unwrap()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

// Provided::Console trait impl
impl provided::Console for Console {
    fn rebind(&mut self, level: Level, binding: Binding) -> Binding {
        Console::rebind(self, level, binding)
    }
}

/// Stock sink: emits resolved messages through the `log` facade, so anything a
/// console lets through lands in the test report once a logger (for tests,
/// `env_logger`) is installed.
pub struct LogSink;

impl SinkClient for LogSink {
    fn emit(&mut self, level: Level, message: &str) {
        log::log!(log::Level::from(level), "{}", message);
    }
}
