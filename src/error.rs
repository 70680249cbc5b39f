//! Error handling for the inventory client

use std::fmt;
use supabase_rust_postgrest::PostgrestError;
use thiserror::Error;

/// A failed call against the remote table API.
///
/// This is the only error users ever see: it is displayed as its message
/// alone. Status and code are kept for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteError {
    /// Human-readable message from the backend
    pub message: String,
    /// HTTP status, when the server answered
    pub status: Option<u16>,
    /// PostgREST or PostgreSQL error code
    pub code: Option<String>,
}

impl RemoteError {
    /// Create a remote error carrying only a message
    pub fn new<T: fmt::Display>(msg: T) -> Self {
        Self {
            message: msg.to_string(),
            status: None,
            code: None,
        }
    }
}

impl From<PostgrestError> for RemoteError {
    fn from(err: PostgrestError) -> Self {
        Self {
            message: err.message(),
            status: err.status().map(|s| s.as_u16()),
            code: err.code().map(str::to_string),
        }
    }
}

/// Unified error type for the inventory client
#[derive(Error, Debug)]
pub enum Error {
    /// The remote table API reported a failure
    #[error("{0}")]
    Remote(#[from] RemoteError),

    /// A row did not have the expected shape
    #[error("unexpected row shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new remote error
    pub fn remote<T: fmt::Display>(msg: T) -> Self {
        Error::Remote(RemoteError::new(msg))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_displays_message_only() {
        let err = Error::Remote(RemoteError {
            message: "permission denied for table products".to_string(),
            status: Some(401),
            code: Some("42501".to_string()),
        });
        assert_eq!(err.to_string(), "permission denied for table products");
    }

    #[test]
    fn from_postgrest_unparsed() {
        let err = RemoteError::from(PostgrestError::UnparsedApiError {
            message: "Bad Gateway".to_string(),
            status: reqwest::StatusCode::BAD_GATEWAY,
        });
        assert_eq!(err.message, "Bad Gateway");
        assert_eq!(err.status, Some(502));
        assert_eq!(err.code, None);
    }
}
