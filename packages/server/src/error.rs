//! Server error definitions.

use thiserror::Error;
use wwebjs_client::ClientError;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The wwebjs client could not be built from the configuration
    #[error("failed to create WhatsApp client: {0}")]
    Client(#[from] ClientError),

    /// Binding or serving failed
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
