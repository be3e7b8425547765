//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A field with a strict parse contract could not be parsed
    #[error("{field} is not valid: '{value}' is not an integer")]
    MalformedConfiguration { field: String, value: String },

    /// Unknown consistency level name or wire code
    #[error("Unknown consistency level '{0}'. Valid levels: ONE, QUORUM, LOCAL_QUORUM, EACH_QUORUM, ALL, ANY, TWO, THREE")]
    UnknownConsistencyLevel(String),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedConfiguration {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Name of the offending field, when the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MalformedConfiguration { field, .. } => Some(field),
            Self::UnknownConsistencyLevel(_) => None,
        }
    }
}
