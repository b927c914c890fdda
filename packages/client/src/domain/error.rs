//! Domain layer error definitions.

use thiserror::Error;

/// Errors raised by pre-flight checks, before any request is sent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Chat ID validation error
    #[error("chat ID cannot be empty")]
    EmptyChatId,

    /// Session ID contains characters outside `[A-Za-z0-9_-]`
    #[error("invalid session ID: {0:?}")]
    InvalidSessionId(String),

    /// Media payload is missing `mimetype`/`data` or `data` is not base64
    #[error("invalid media data: mimetype and base64 data are required")]
    InvalidMediaData,

    /// URL could not be parsed or has no host
    #[error("invalid URL: {0:?}")]
    InvalidUrl(String),

    /// Latitude outside [-90, 90] or longitude outside [-180, 180]
    #[error("invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Poll options empty, too many, or containing a blank entry
    #[error("invalid poll options: between 1 and {max} non-empty options are required")]
    InvalidPollOptions { max: usize },

    /// Poll question is blank
    #[error("poll name cannot be empty")]
    EmptyPollName,

    /// Shared contact ID is blank
    #[error("contact ID cannot be empty")]
    EmptyContactId,
}

/// Failures of the HTTP exchange itself.
///
/// A response that arrives with a non-2xx status is not a transport error; it
/// becomes an unsuccessful [`ApiResponse`](super::ApiResponse).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, TLS failure and similar
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The response body was not valid JSON
    #[error("could not parse response body (status {status}): {reason}")]
    InvalidBody { status: u16, reason: String },
}
