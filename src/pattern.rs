use crate::ports::provided::PatternError;
use regex::Regex;

/// One entry of an expected-message list.
///
/// An interceptor holds an ordered `Vec<Pattern>` and tests resolved messages
/// against it first-match-wins; `Pattern` itself only answers whether a single
/// message matches.
///
/// # Examples
///
/// ```
/// use console_intercept::Pattern;
///
/// assert!(Pattern::any().matches("anything at all"));
/// assert!(Pattern::contains("refused").matches("connection refused by peer"));
///
/// let timeout = Pattern::regex(r"timeout after \d+ms").unwrap();
/// assert!(timeout.matches("timeout after 250ms"));
/// assert!(!timeout.matches("timeout after ms"));
/// ```
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches every message. The default expectation.
    Any,
    /// Matches messages containing the substring.
    Contains(String),
    /// Matches messages the compiled regex finds a match in.
    Regex(Regex),
}

impl Pattern {
    pub fn any() -> Self {
        Pattern::Any
    }

    pub fn contains(needle: impl Into<String>) -> Self {
        Pattern::Contains(needle.into())
    }

    /// Compiles `pattern`; a malformed regex is a construction-time error.
    pub fn regex(pattern: &str) -> Result<Self, PatternError> {
        Regex::new(pattern)
            .map(Pattern::Regex)
            .map_err(|e| PatternError::InvalidRegex(e.to_string()))
    }

    pub fn matches(&self, message: &str) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Contains(needle) => message.contains(needle),
            Pattern::Regex(re) => re.is_match(message),
        }
    }
}
