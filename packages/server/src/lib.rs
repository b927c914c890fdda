//! HTTP service over wwebjs-client's room listing.
//!
//! Lists, filters, sorts and paginates the chats of a WhatsApp session and
//! renders them as JSON, a raw array or an HTML table.

pub mod error;
pub mod infrastructure;
pub mod ui;

// Re-export entry points
pub use ui::{ServerConfig, create_router, run};
