//! Error types for personledger.
//!
//! Every failure carries a message naming the operation and the offending
//! key or value. Nothing is retried or recovered locally; the host aborts the
//! enclosing transaction.

use thiserror::Error;

/// All personledger errors.
#[derive(Debug, Error)]
pub enum Error {
    /// No record is stored under the requested key
    #[error("not found: {0}")]
    NotFound(String),

    /// Stored bytes could not be decoded, or a value could not be encoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A listing or query produced no records
    #[error("empty result: {0}")]
    EmptyResult(String),

    /// The world-state backend failed
    #[error("storage error: {0}")]
    Storage(String),

    /// Rejected identifier or malformed invocation
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for personledger operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if a listing came back empty.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Error::EmptyResult(_))
    }

    /// Check if this is a serialization error.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::Serialization(_))
    }

    /// Check if the backend failed.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    /// Check if the input was rejected.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// Prefix the message with the operation that failed, keeping the kind.
    pub fn in_operation(self, operation: &str) -> Self {
        let prefix = |msg: String| format!("{}: {}", operation, msg);
        match self {
            Error::NotFound(msg) => Error::NotFound(prefix(msg)),
            Error::Serialization(msg) => Error::Serialization(prefix(msg)),
            Error::EmptyResult(msg) => Error::EmptyResult(prefix(msg)),
            Error::Storage(msg) => Error::Storage(prefix(msg)),
            Error::InvalidInput(msg) => Error::InvalidInput(prefix(msg)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
