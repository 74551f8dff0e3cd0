//! Response generator error types

use thiserror::Error;

/// Generator failure with classification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct GenerateError {
    pub kind: GenerateErrorKind,
    pub message: String,
}

impl GenerateError {
    pub fn new(kind: GenerateErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(GenerateErrorKind::Transport, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(GenerateErrorKind::Upstream, message)
    }
}

/// Where the failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateErrorKind {
    /// Could not reach the service (connect, timeout, request build)
    Transport,
    /// The service answered, but not with a usable completion
    Upstream,
}

impl std::fmt::Display for GenerateErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport => f.write_str("transport error"),
            Self::Upstream => f.write_str("upstream error"),
        }
    }
}
