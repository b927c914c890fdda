//! UseCase layer error definitions.

use thiserror::Error;

use crate::error::ClientError;

/// Errors raised while building a room list
#[derive(Debug, Error)]
pub enum ListRoomsError {
    /// The API answered the chat listing with an unsuccessful envelope
    #[error("Failed to retrieve chats: {0}")]
    ChatsUnavailable(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}
