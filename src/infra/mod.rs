//! Infrastructure layer providing abstractions for external dependencies.
//!
//! This module contains the outbound clients the inspectors are built on:
//! - HTTP client construction for the header fetch
//! - TLS configuration and handshakes for the certificate check

pub mod http;
pub mod tls;

pub use http::create_http_client;
pub use tls::{connect_tls, create_tls_config, RustlsTlsProvider, TlsProvider};
