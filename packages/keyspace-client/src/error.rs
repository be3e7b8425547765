//! Error types for keyspace-client
//!
//! Query-time failures come in two families:
//!
//! - [`RemoteQueryError`]: raised by the wire client and passed through untouched
//! - [`DecodingError`]: a returned column did not fit the expected comparator type
//!
//! Configuration-time failures live in [`crate::config::ConfigError`].

use std::fmt;
use thiserror::Error;

/// Remote error kinds reported by a wire client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// Not enough replicas alive to satisfy the consistency level
    Unavailable,
    /// Replicas did not answer within the server-side timeout
    TimedOut,
    /// The request was rejected as malformed
    InvalidRequest,
    /// Credentials were refused
    Authentication,
    /// Socket/framing level failure
    Transport,
}

impl RemoteErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteErrorKind::Unavailable => "unavailable",
            RemoteErrorKind::TimedOut => "timed_out",
            RemoteErrorKind::InvalidRequest => "invalid_request",
            RemoteErrorKind::Authentication => "authentication",
            RemoteErrorKind::Transport => "transport",
        }
    }
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned by the remote store or the transport in front of it
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct RemoteQueryError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: RemoteErrorKind,
    pub message: String,
}

impl RemoteQueryError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Unavailable, message)
    }

    pub fn timed_out(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::TimedOut, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::InvalidRequest, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Authentication, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Transport, message)
    }
}

impl From<std::io::Error> for RemoteQueryError {
    fn from(err: std::io::Error) -> Self {
        RemoteQueryError::transport(format!("I/O error: {}", err)).with_source(err)
    }
}

/// A wire value that could not be converted to its comparator type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingError {
    #[error("{type_name} expects {expected} bytes, got {actual}")]
    InvalidLength {
        type_name: &'static str,
        expected: String,
        actual: usize,
    },

    #[error("{type_name} value is not valid UTF-8")]
    InvalidUtf8 { type_name: &'static str },

    #[error("{type_name} value contains a non-ASCII byte at offset {offset}")]
    NonAscii {
        type_name: &'static str,
        offset: usize,
    },

    /// A super column arrived where plain sub-columns were expected
    #[error("unexpected super column in a sub-column slice")]
    UnexpectedSuperColumn,
}

impl DecodingError {
    pub fn invalid_length(type_name: &'static str, expected: impl ToString, actual: usize) -> Self {
        Self::InvalidLength {
            type_name,
            expected: expected.to_string(),
            actual,
        }
    }
}

/// Error surfaced while running a query operation
#[derive(Debug, Error)]
pub enum QueryError {
    /// Propagated as-is from the wire client
    #[error(transparent)]
    Remote(#[from] RemoteQueryError),

    /// A row could not be materialized; the rest of the slice is abandoned
    #[error("failed to decode row {}: {source}", display_key(.key))]
    Decoding {
        key: Vec<u8>,
        #[source]
        source: DecodingError,
    },
}

impl QueryError {
    pub fn decoding(key: impl Into<Vec<u8>>, source: DecodingError) -> Self {
        Self::Decoding {
            key: key.into(),
            source,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, QueryError::Remote(_))
    }

    pub fn is_decoding(&self) -> bool {
        matches!(self, QueryError::Decoding { .. })
    }
}

/// Printable form of a row key: UTF-8 when possible, hex otherwise
pub(crate) fn display_key(key: &[u8]) -> String {
    match std::str::from_utf8(key) {
        Ok(text) if !text.chars().any(char::is_control) => text.to_string(),
        _ => key.iter().map(|b| format!("{:02x}", b)).collect(),
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, QueryError>;
