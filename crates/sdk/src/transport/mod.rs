//! Transport layer for the Scanboard SDK.

pub mod http;

pub use http::HttpTransport;
