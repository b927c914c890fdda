//! Console commands for session, message and contact operations.

pub mod args;
pub mod commands;

pub use args::{ApiArgs, Cli, Command, ContactCommand, MessageCommand, SessionCommand};
pub use commands::{EXIT_ERROR, EXIT_OK, run};
