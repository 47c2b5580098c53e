use crate::level::Level;
use serde_json::Value;

/// One rebindable console operation. Receives the raw message and its positional
/// substitution arguments; placeholder resolution is the binding's job.
pub type Binding = Box<dyn FnMut(&str, &[Value]) + Send>;

#[derive(Debug, PartialEq)]
pub enum PatternError {
    InvalidRegex(String),
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternError::InvalidRegex(msg) => write!(f, "InvalidRegex: {}", msg),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum KeyError {
    UnknownCounter(String),
    UnknownLevel(String),
}

impl std::fmt::Display for KeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyError::UnknownCounter(key) => write!(f, "UnknownCounter: {}", key),
            KeyError::UnknownLevel(key)   => write!(f, "UnknownLevel: {}", key),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ManifestError {
    FileNotFound(String),
    AmbiguousFile(String),
    ReadError(String),
    ParseError(String),
    UnknownLevel(String),
    InvalidPattern(String),
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::FileNotFound(msg)   => write!(f, "FileNotFound: {}", msg),
            ManifestError::AmbiguousFile(msg)  => write!(f, "AmbiguousFile: {}", msg),
            ManifestError::ReadError(msg)      => write!(f, "ReadError: {}", msg),
            ManifestError::ParseError(msg)     => write!(f, "ParseError: {}", msg),
            ManifestError::UnknownLevel(msg)   => write!(f, "UnknownLevel: {}", msg),
            ManifestError::InvalidPattern(msg) => write!(f, "InvalidPattern: {}", msg),
        }
    }
}

/// The narrow surface an interceptor works against: read-and-replace of one
/// level's binding, fused into a single swap.
pub trait Console {
    /// Installs `binding` for `level` and returns the binding it displaced.
    fn rebind(&mut self, level: Level, binding: Binding) -> Binding;
}
