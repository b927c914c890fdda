//! HTTP transports.

pub mod http;

pub use http::ReqwestTransport;
