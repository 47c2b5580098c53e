use serde_json::Value;

/// # Examples
/// ```
/// use console_intercept::common::log_format::LogFormat;
///
/// let fn_message = LogFormat::call("Interceptor", "install", &["'error'".to_string()]);
/// assert_eq!(fn_message, "Interceptor::install('error')");
/// ```
pub struct LogFormat;

impl LogFormat {

    pub fn call(class: &str, fn_name: &str, args: &[String]) -> String {
        let args_str = args.join(", ");
        format!("{}::{}({})", class, fn_name, args_str)
    }

    pub fn error(class: &str, fn_name: &str, message: &str) -> String {
        format!("{}::{}: {}", class, fn_name, message)
    }

    /// Format JSON value for log output
    ///
    /// # Examples
    /// ```
    /// use console_intercept::common::log_format::LogFormat;
    /// use serde_json::json;
    ///
    /// assert_eq!(LogFormat::format_arg(&json!("text")), "'text'");
    /// assert_eq!(LogFormat::format_arg(&json!(42)), "42");
    /// assert_eq!(LogFormat::format_arg(&json!(true)), "true");
    /// assert_eq!(LogFormat::format_arg(&json!(null)), "null");
    /// assert_eq!(LogFormat::format_arg(&json!([])), "[]");
    /// assert_eq!(LogFormat::format_arg(&json!({})), "{}");
    /// assert_eq!(LogFormat::format_arg(&json!([1, 2, 3])), "[3 items]");
    /// assert_eq!(LogFormat::format_arg(&json!({"a": 1})), "{1 fields}");
    /// ```
    pub fn format_arg(value: &Value) -> String {
        match value {
            Value::String(s) if s.len() > 50 => {
                format!("'{}'...", Self::truncate(s, 47))
            }
            Value::String(s) => {
                format!("'{}'", s)
            }
            Value::Array(arr) => {
                if arr.is_empty() {
                    "[]".to_string()
                } else {
                    format!("[{} items]", arr.len())
                }
            }
            Value::Object(obj) => {
                if obj.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{{} fields}}", obj.len())
                }
            }
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
        }
    }

    /// Format string argument for log output
    ///
    /// # Examples
    /// ```
    /// use console_intercept::common::log_format::LogFormat;
    ///
    /// assert_eq!(LogFormat::format_str_arg("key"), "'key'");
    /// ```
    pub fn format_str_arg(s: &str) -> String {
        if s.len() > 50 {
            format!("'{}'...", Self::truncate(s, 47))
        } else {
            format!("'{}'", s)
        }
    }

    // Cut at or below `max` bytes, never inside a character. Messages are
    // arbitrary user text, so a byte offset alone is not a valid slice point.
    fn truncate(s: &str, max: usize) -> &str {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}

/// Log macro: fn call
///
/// # Examples
/// ```ignore
/// use crate::fn_log;
///
/// fn_log!("Interceptor", "install", "error");
/// // Logs: Interceptor::install('error')
/// ```
#[macro_export]
macro_rules! fn_log {
    ($class:expr, $fun:expr $(, $arg:expr)*) => {{
        #[cfg(feature = "logging")]
        {
            let args: Vec<String> = vec![
                $(
                    $crate::common::log_format::LogFormat::format_str_arg($arg),
                )*
            ];
            log::debug!("{}", $crate::common::log_format::LogFormat::call($class, $fun, &args));
        }
    }};
}

/// Log macro: warning from inside a fn
///
/// # Examples
/// ```ignore
/// use crate::warn_log;
///
/// warn_log!("Placeholder", "resolve", "2 argument(s) left unconsumed");
/// // Logs: Placeholder::resolve: 2 argument(s) left unconsumed
/// ```
#[macro_export]
macro_rules! warn_log {
    ($class:expr, $fun:expr, $msg:expr) => {{
        #[cfg(feature = "logging")]
        {
            log::warn!("{}", $crate::common::log_format::LogFormat::error($class, $fun, $msg));
        }
    }};
}
