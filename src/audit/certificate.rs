//! TLS certificate inspection.

use super::types::{CertificateCheckResult, CertificateDetails};
use crate::error::ScanError;
use crate::infra::{connect_tls, TlsProvider};
use crate::shared::{extract_hostname, extract_leaf_certificate, LeafCertificate};
use chrono::{DateTime, Utc};
use std::time::Duration;

const UNKNOWN: &str = "Unknown";

/// Converts a parsed leaf certificate into the reported record, relative to `now`.
pub fn certificate_details(leaf: LeafCertificate, now: DateTime<Utc>) -> CertificateDetails {
    let days_remaining = leaf.days_remaining(now);
    CertificateDetails {
        issuer: leaf
            .issuer_organization
            .unwrap_or_else(|| UNKNOWN.to_string()),
        subject: leaf
            .subject_common_name
            .unwrap_or_else(|| UNKNOWN.to_string()),
        not_before: leaf.not_before.date_naive(),
        not_after: leaf.not_after.date_naive(),
        days_remaining,
    }
}

async fn fetch_leaf_certificate<P: TlsProvider + ?Sized>(
    provider: &P,
    domain: &str,
    port: u16,
    limit: Duration,
) -> Result<LeafCertificate, ScanError> {
    let hostname = extract_hostname(domain)?;
    tracing::debug!(host = %hostname, port, "Opening TLS connection");

    let stream = connect_tls(provider, &hostname, port, limit).await?;
    extract_leaf_certificate(&stream)
}

/// Handshakes with `domain` and reports on the certificate it presents.
///
/// Every failure is folded into [`CertificateCheckResult::Invalid`]:
/// handshake and verification failures carry an `SSL error: ` prefix,
/// timeouts read `Connection timed out`, and anything else carries the
/// underlying error's description.
pub async fn check_ssl_certificate<P: TlsProvider + ?Sized>(
    provider: &P,
    domain: &str,
    port: u16,
    limit: Duration,
) -> CertificateCheckResult {
    match fetch_leaf_certificate(provider, domain, port, limit).await {
        Ok(leaf) => CertificateCheckResult::Valid(certificate_details(leaf, Utc::now())),
        Err(e) => {
            tracing::warn!(domain = %domain, error = %e, "Certificate check failed");
            CertificateCheckResult::Invalid {
                error: e.to_string(),
            }
        }
    }
}
