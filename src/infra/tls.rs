//! TLS/SSL infrastructure.
//!
//! Provides trait-based abstractions for TLS configuration and connection handling.

use crate::error::ScanError;
use rustls::pki_types::ServerName;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::{client::TlsStream, TlsConnector};

/// Trait for TLS configuration providers.
///
/// This abstraction allows for different TLS configurations
/// and makes testing easier by allowing mock implementations.
pub trait TlsProvider: Send + Sync {
    /// Returns the TLS client configuration.
    fn client_config(&self) -> Arc<rustls::ClientConfig>;

    /// Creates a TLS connector from this provider's configuration.
    fn connector(&self) -> TlsConnector {
        TlsConnector::from(self.client_config())
    }
}

/// Default TLS provider using rustls with Mozilla's root certificates.
///
/// The configuration is built once and shared by every handshake.
#[derive(Clone)]
pub struct RustlsTlsProvider {
    config: Arc<rustls::ClientConfig>,
}

impl RustlsTlsProvider {
    /// Creates a new `RustlsTlsProvider` instance.
    pub fn new() -> Result<Self, ScanError> {
        Ok(Self {
            config: create_tls_config()?,
        })
    }
}

impl TlsProvider for RustlsTlsProvider {
    fn client_config(&self) -> Arc<rustls::ClientConfig> {
        self.config.clone()
    }
}

/// Creates a TLS client configuration with Mozilla's root certificates.
///
/// This configuration:
/// - Uses webpki-roots for trusted root certificates
/// - Verifies the chain and the server name
/// - Does not use client authentication
/// - Supports TLS 1.2 and TLS 1.3
pub fn create_tls_config() -> Result<Arc<rustls::ClientConfig>, ScanError> {
    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = rustls::ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .map_err(|e| ScanError::Tls(e.to_string()))?
    .with_root_certificates(root_store)
    .with_no_client_auth();

    Ok(Arc::new(config))
}

/// Opens a TCP connection to `host:port` and performs a TLS handshake.
///
/// `host` doubles as the SNI value. `limit` bounds the TCP connect and the
/// handshake separately.
///
/// # Errors
///
/// - [`ScanError::InvalidHost`] if `host` is not a valid server name
/// - [`ScanError::Timeout`] if either phase exceeds `limit`
/// - [`ScanError::Io`] if the TCP connection fails, DNS included
/// - [`ScanError::Tls`] if the handshake or certificate verification fails
pub async fn connect_tls<P: TlsProvider + ?Sized>(
    provider: &P,
    host: &str,
    port: u16,
    limit: Duration,
) -> Result<TlsStream<TcpStream>, ScanError> {
    let server_name = ServerName::try_from(host.to_string())
        .map_err(|e| ScanError::InvalidHost(format!("{}: {}", host, e)))?;

    let tcp_stream = match timeout(limit, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => return Err(ScanError::Io(e)),
        Err(_) => return Err(ScanError::Timeout),
    };

    match timeout(limit, provider.connector().connect(server_name, tcp_stream)).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(e)) => Err(ScanError::Tls(e.to_string())),
        Err(_) => Err(ScanError::Timeout),
    }
}
