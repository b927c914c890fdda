//! Shared utilities for wwebjs-rs binaries and libraries.

pub mod logger;
pub mod time;
