//! Infrastructure layer: concrete implementations of the domain seams.

pub mod cache;
pub mod transport;

pub use cache::InMemoryCache;
pub use transport::ReqwestTransport;
