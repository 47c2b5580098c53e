use crate::warn_log;
use regex::Regex;
use serde_json::Value;

/// Placeholder - positional `%s` substitution for console messages
///
/// Pure string processing shared by every binding, so a message resolves the
/// same way whether it is emitted, matched, or forwarded.
///
/// Rules:
/// - tokens are consumed left to right, one argument each
/// - when arguments run out, remaining tokens substitute the empty string
/// - surplus arguments are dropped
pub struct Placeholder;

impl Placeholder {
    /// Number of `%s` tokens in `template`.
    ///
    /// # Examples
    ///
    /// ```
    /// use console_intercept::common::placeholder::Placeholder;
    ///
    /// assert_eq!(Placeholder::count("open %s on %s"), 2);
    /// assert_eq!(Placeholder::count("no tokens"), 0);
    /// ```
    pub fn count(template: &str) -> usize {
        let re = Regex::new(r"%s").unwrap();
        re.find_iter(template).count()
    }

    /// Replace each `%s` in `template`, left to right, with the next argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use console_intercept::common::placeholder::Placeholder;
    /// use serde_json::json;
    ///
    /// let resolved = Placeholder::resolve("open %s on port %s", &[json!("db"), json!(5432)]);
    /// assert_eq!(resolved, "open db on port 5432");
    /// ```
    ///
    /// # Missing arguments
    ///
    /// ```
    /// use console_intercept::common::placeholder::Placeholder;
    /// use serde_json::json;
    ///
    /// let resolved = Placeholder::resolve("%s and %s", &[json!("first")]);
    /// assert_eq!(resolved, "first and ");
    /// ```
    pub fn resolve(template: &str, args: &[Value]) -> String {
        let re = Regex::new(r"%s").unwrap();
        let mut result = String::new();
        let mut last_match = 0;
        let mut remaining = args.iter();

        for m in re.find_iter(template) {
            result.push_str(&template[last_match..m.start()]);

            // Out of arguments: the token substitutes the empty string
            if let Some(value) = remaining.next() {
                result.push_str(&Self::render(value));
            }

            last_match = m.end();
        }

        result.push_str(&template[last_match..]);

        let leftover = remaining.count();
        if leftover > 0 {
            warn_log!(
                "Placeholder",
                "resolve",
                &format!("{} argument(s) left unconsumed", leftover)
            );
        }

        result
    }

    /// How one argument reads inside a message: strings unquoted, null empty,
    /// anything else its compact JSON text.
    ///
    /// # Examples
    ///
    /// ```
    /// use console_intercept::common::placeholder::Placeholder;
    /// use serde_json::json;
    ///
    /// assert_eq!(Placeholder::render(&json!("text")), "text");
    /// assert_eq!(Placeholder::render(&json!(42)), "42");
    /// assert_eq!(Placeholder::render(&json!(true)), "true");
    /// assert_eq!(Placeholder::render(&json!(null)), "");
    /// assert_eq!(Placeholder::render(&json!([1, 2])), "[1,2]");
    /// ```
    pub fn render(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
