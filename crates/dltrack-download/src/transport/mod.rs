//! Transport implementations.

mod error;
mod http;

pub use http::ReqwestTransport;
