//! Error type shared by all three calculation engines

use thiserror::Error;

/// Precondition violation on an engine input.
///
/// Every invalid input is rejected synchronously with one of these; the
/// engines never clamp bad values or return partial results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The violated constraint, in human-readable form.
    pub fn message(&self) -> &str {
        &self.message
    }
}
