//! Scanner abstraction layer.
//!
//! Provides a trait-based abstraction over the two network inspections,
//! enabling dependency injection and testing the API without a network.

use super::certificate::check_ssl_certificate;
use super::headers::check_security_headers;
use super::scoring::summarize;
use super::types::{AuditReport, CertificateCheckResult, HeaderCheckResult};
use crate::config::ScanSettings;
use crate::error::ScanError;
use crate::infra::{create_http_client, RustlsTlsProvider};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Trait for services that inspect a domain's security posture.
///
/// Implementations must fold every failure into the returned result.
pub trait Scanner: Send + Sync {
    /// Checks the domain's response for the required security headers.
    fn scan_headers<'a>(
        &'a self,
        domain: &'a str,
    ) -> Pin<Box<dyn Future<Output = HeaderCheckResult> + Send + 'a>>;

    /// Checks the certificate the domain presents on its TLS port.
    fn scan_certificate<'a>(
        &'a self,
        domain: &'a str,
    ) -> Pin<Box<dyn Future<Output = CertificateCheckResult> + Send + 'a>>;
}

/// Scanner that talks to the real host.
///
/// The HTTP client and TLS configuration are built once from
/// [`ScanSettings`] and shared across requests.
#[derive(Clone)]
pub struct LiveScanner {
    http: reqwest::Client,
    tls: RustlsTlsProvider,
    settings: ScanSettings,
}

impl LiveScanner {
    /// Creates a new `LiveScanner` instance.
    pub fn new(settings: ScanSettings) -> Result<Self, ScanError> {
        Ok(Self {
            http: create_http_client(&settings)?,
            tls: RustlsTlsProvider::new()?,
            settings,
        })
    }

    /// Creates a new `LiveScanner` wrapped in an `Arc`.
    pub fn arc(settings: ScanSettings) -> Result<Arc<Self>, ScanError> {
        Self::new(settings).map(Arc::new)
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }
}

impl Scanner for LiveScanner {
    fn scan_headers<'a>(
        &'a self,
        domain: &'a str,
    ) -> Pin<Box<dyn Future<Output = HeaderCheckResult> + Send + 'a>> {
        Box::pin(check_security_headers(&self.http, domain))
    }

    fn scan_certificate<'a>(
        &'a self,
        domain: &'a str,
    ) -> Pin<Box<dyn Future<Output = CertificateCheckResult> + Send + 'a>> {
        Box::pin(check_ssl_certificate(
            &self.tls,
            domain,
            self.settings.tls_port,
            self.settings.tls_timeout,
        ))
    }
}

/// Runs both inspections concurrently and grades the domain.
pub async fn full_audit<S: Scanner + ?Sized>(scanner: &S, domain: &str) -> AuditReport {
    let (headers, ssl) = tokio::join!(scanner.scan_headers(domain), scanner.scan_certificate(domain));
    let summary = summarize(&headers, &ssl);

    tracing::debug!(
        domain = %domain,
        score = summary.score,
        grade = ?summary.letter_grade,
        "Audit complete"
    );

    AuditReport {
        domain: domain.to_string(),
        summary,
        headers,
        ssl,
    }
}
