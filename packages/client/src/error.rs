//! Client-level error definitions.

use thiserror::Error;

use crate::domain::{TransportError, ValidationError};

#[derive(Debug, Error)]
pub enum ClientError {
    /// A required setting is missing or malformed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Input rejected before any request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The HTTP exchange itself failed; no envelope is available
    #[error("API request failed: {0}")]
    RequestFailed(#[from] TransportError),
}
