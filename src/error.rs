//! Error types.

use alloc::string::String;

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while configuring or driving the synthesizer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A voice, tract or control parameter is outside its valid range.
    #[error("invalid configuration '{name}': {message}")]
    InvalidConfiguration {
        /// Parameter name as it appears in the configuration surface.
        name: &'static str,
        /// Description of the violated constraint.
        message: String,
    },

    /// A phone or word is absent from the articulation table.
    #[error("'{0}' not found in articulation table")]
    LookupNotFound(String),

    /// A filter kernel could not be designed from the given parameters.
    #[error("degenerate filter design: {0}")]
    DegenerateFilterDesign(&'static str),
}

impl Error {
    /// Creates an invalid configuration error.
    pub fn invalid_config(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            name,
            message: message.into(),
        }
    }

    /// Creates a filter design error.
    pub fn degenerate(reason: &'static str) -> Self {
        Self::DegenerateFilterDesign(reason)
    }
}
