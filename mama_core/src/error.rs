//! Error types for the mama_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for mama_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Command text is malformed (missing, extra or non-numeric tokens)
    #[error("{reason}\n{usage}")]
    Syntax { reason: String, usage: &'static str },

    /// Command text is well-formed but a value is not acceptable
    #[error("{reason}\n{usage}")]
    Validation { reason: String, usage: &'static str },

    /// The shown list has nothing to act on
    #[error("There are no items to delete. The shown list is empty.\n{usage}")]
    EmptyList { usage: &'static str },

    /// A command index no longer fits the shown list
    #[error("{reason}\n{usage}")]
    OutOfRange { reason: String, usage: &'static str },

    /// Raised by the entry list when a shown index is stale
    #[error("Index {index} is out of bounds for a shown list of size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    /// Saving the journal failed; the previous file is left untouched
    #[error("Failed to save updated data to disk. Please check your file permissions or try again.")]
    Persistence(#[source] io::Error),

    /// A single storage line could not be decoded
    #[error("{0}")]
    Format(String),

    /// A storage line failed to decode while loading the journal
    #[error("Malformed entry on line {line_no} of the data file: {reason}")]
    MalformedLine { line_no: usize, reason: String },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn syntax(reason: impl Into<String>, usage: &'static str) -> Self {
        Error::Syntax {
            reason: reason.into(),
            usage,
        }
    }

    pub(crate) fn validation(reason: impl Into<String>, usage: &'static str) -> Self {
        Error::Validation {
            reason: reason.into(),
            usage,
        }
    }

    /// True for errors a user can recover from by typing another command
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Error::MalformedLine { .. } | Error::Toml(_) | Error::Config(_)
        )
    }
}
