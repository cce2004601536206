//! Error types for the time-series client
//!
//! Errors fall into two families:
//!
//! - **Local** errors ([`Error::InvalidArgument`], [`Error::OutOfRange`],
//!   [`Error::InvalidCast`]) are raised while building values or command
//!   arguments, always before anything is sent to the server.
//! - **Remote** errors ([`Error::Remote`]) carry the server's message verbatim,
//!   e.g. `"TSDB: the key does not exist"`. They are never retried or rewritten.

use redis::{ErrorKind, RedisError};
use thiserror::Error;

/// Main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    /// A parameter was rejected before any command was issued
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A bounded value was constructed outside its allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the value being constructed
        field: &'static str,
        /// The rejected value
        value: String,
        /// Smallest accepted value
        min: String,
        /// Largest accepted value
        max: String,
    },

    /// A value was read as a type it does not hold (e.g. a sentinel timestamp as an integer)
    #[error("Invalid cast: {0}")]
    InvalidCast(String),

    /// The reply did not have the shape the command produces
    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),

    /// Error signalled by the server, message kept verbatim
    #[error("{0}")]
    Remote(String),

    /// Transport failure (I/O, timeout, protocol)
    #[error("Transport error: {0}")]
    Transport(RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Shorthand for [`Error::UnexpectedReply`]
    pub fn unexpected_reply(message: impl Into<String>) -> Self {
        Error::UnexpectedReply(message.into())
    }

    /// True when the error was raised by the server
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote(_))
    }

    /// The server's message, if this is a remote error
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Error::Remote(message) => Some(message),
            _ => None,
        }
    }

    /// True for errors raised locally before any command reached the server
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument(_) | Error::OutOfRange { .. } | Error::InvalidCast(_)
        )
    }
}

impl From<RedisError> for Error {
    /// Splits server-signalled errors from transport failures.
    ///
    /// For a plain `ERR ...` reply the client library strips the `ERR` code, so
    /// the detail is the server text. Any other code (the module may answer
    /// with `TSDB: ...` directly) is re-joined with its detail.
    fn from(err: RedisError) -> Self {
        match err.kind() {
            ErrorKind::ResponseError => match err.detail() {
                Some(detail) => Error::Remote(detail.to_string()),
                None => Error::Transport(err),
            },
            ErrorKind::ExtensionError => match (err.code(), err.detail()) {
                (Some(code), Some(detail)) => Error::Remote(format!("{} {}", code, detail)),
                (None, Some(detail)) => Error::Remote(detail.to_string()),
                _ => Error::Transport(err),
            },
            _ => Error::Transport(err),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_error_is_remote_verbatim() {
        let err: Error = RedisError::from((
            ErrorKind::ResponseError,
            "An error was signalled by the server",
            "TSDB: the key does not exist".to_string(),
        ))
        .into();

        assert!(err.is_remote());
        assert_eq!(err.remote_message(), Some("TSDB: the key does not exist"));
        assert_eq!(err.to_string(), "TSDB: the key does not exist");
    }

    #[test]
    fn test_io_error_is_transport() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err: Error = RedisError::from(io).into();

        assert!(matches!(err, Error::Transport(_)));
        assert!(!err.is_remote());
        assert!(!err.is_local());
    }

    #[test]
    fn test_out_of_range_message() {
        let err = Error::OutOfRange {
            field: "timestamp",
            value: "-1".to_string(),
            min: "0".to_string(),
            max: "253402271999999".to_string(),
        };
        assert!(err.is_local());
        assert_eq!(
            err.to_string(),
            "timestamp value -1 is out of range [0, 253402271999999]"
        );
    }
}
