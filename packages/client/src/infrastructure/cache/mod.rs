//! Cache store implementations.

pub mod inmemory;

pub use inmemory::InMemoryCache;
