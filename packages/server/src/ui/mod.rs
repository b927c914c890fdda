//! Room list HTTP service.

pub mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{ServerConfig, create_router, run};
