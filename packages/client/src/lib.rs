//! Typed client for the WhatsApp Web REST API (wwebjs-api).
//!
//! [`WhatsAppClient`] wraps every endpoint of the service in a typed method
//! that resolves the session, optionally serves read-only calls from a TTL
//! cache and returns an [`ApiResponse`](domain::ApiResponse) envelope.
//! Multi-call flows (room listing, broadcast) live in [`usecase`], the
//! console commands in [`cli`].

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod usecase;

// Re-export entry points
pub use api::WhatsAppClient;
pub use config::ClientConfig;
pub use error::ClientError;
