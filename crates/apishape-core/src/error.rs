//! Error types for the apishape core library
//!
//! This module defines the error handling system for the transformation
//! pipeline, using thiserror for ergonomic error definitions.

use thiserror::Error;

/// Main error type for apishape operations
#[derive(Error, Debug)]
pub enum Error {
    /// The pipeline input is not a record or a sequence of records, or a
    /// record in a multi-record input lacks the primary alias
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    /// Nesting was requested but the primary alias is absent from a record
    #[error("Missing primary key '{alias}' in record")]
    MissingPrimaryKey {
        alias: String,
    },

    /// Configuration errors (for example an unparsable time zone)
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a missing primary key error
    pub fn missing_primary_key(alias: impl Into<String>) -> Self {
        Self::MissingPrimaryKey {
            alias: alias.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
