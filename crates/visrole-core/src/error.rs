//! Error types for the visrole core library
//!
//! Only genuinely exceptional misuse surfaces as an [`Error`]: a malformed
//! constraint or type specification. Mapping violations are reported as
//! [`ValidationErrors`](crate::validation::ValidationErrors) data instead.
//!
//! Copyright (c) 2025 Visrole Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Main error type for visrole operations
#[derive(Error, Debug)]
pub enum Error {
    /// A constraint, property, or table specification has the wrong shape
    #[error("Invalid configuration at '{path}': {message}")]
    InvalidConfiguration {
        path: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A role was looked up that the model type does not declare
    #[error("Unknown role: {name}")]
    UnknownRole { name: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid configuration error without an underlying cause
    pub fn invalid_configuration(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid configuration error caused by another error
    pub fn invalid_configuration_with_source(
        path: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Error::InvalidConfiguration {
            path: path.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Whether this error was raised by a malformed specification
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfiguration { .. })
    }
}
