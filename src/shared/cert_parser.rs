//! X.509 certificate parsing utilities.
//!
//! Provides functionality for extracting the audited fields from a server's
//! leaf certificate.

use crate::error::ScanError;
use chrono::{DateTime, Utc};
use tokio::net::TcpStream;
use x509_parser::prelude::*;

const SECONDS_PER_DAY: i64 = 86_400;

/// Fields of a leaf certificate that the certificate inspector reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafCertificate {
    /// `organizationName` of the issuer DN, if present.
    pub issuer_organization: Option<String>,
    /// `commonName` of the subject DN, if present.
    pub subject_common_name: Option<String>,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

impl LeafCertificate {
    /// Whole days from `now` until expiry, floored.
    ///
    /// Negative once the certificate has expired; a certificate that expired
    /// an hour ago is already at `-1`.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.not_after - now)
            .num_seconds()
            .div_euclid(SECONDS_PER_DAY)
    }
}

fn to_datetime(time: &ASN1Time) -> Result<DateTime<Utc>, ScanError> {
    DateTime::from_timestamp(time.timestamp(), 0)
        .ok_or_else(|| ScanError::Certificate(format!("timestamp out of range: {}", time)))
}

/// Parses a DER-encoded X.509 certificate.
///
/// UTCTime and GeneralizedTime validity encodings are both accepted.
pub fn parse_leaf_certificate(der: &[u8]) -> Result<LeafCertificate, ScanError> {
    let (_, cert) =
        X509Certificate::from_der(der).map_err(|e| ScanError::Certificate(e.to_string()))?;

    let validity = cert.validity();

    let leaf = LeafCertificate {
        issuer_organization: cert
            .issuer()
            .iter_organization()
            .next()
            .and_then(|o| o.as_str().ok())
            .map(|s| s.to_string()),
        subject_common_name: cert
            .subject()
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .map(|s| s.to_string()),
        not_before: to_datetime(&validity.not_before)?,
        not_after: to_datetime(&validity.not_after)?,
    };
    Ok(leaf)
}

/// Extracts and parses the peer's leaf certificate from a TLS connection.
pub fn extract_leaf_certificate(
    conn: &tokio_rustls::client::TlsStream<TcpStream>,
) -> Result<LeafCertificate, ScanError> {
    let (_, client_conn) = conn.get_ref();

    let cert = client_conn
        .peer_certificates()
        .and_then(|certs| certs.first())
        .ok_or_else(|| ScanError::Tls("server presented no certificate".to_string()))?;

    parse_leaf_certificate(cert.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn der_from_pem(pem: &str) -> Vec<u8> {
        let (_, pem) = x509_parser::pem::parse_x509_pem(pem.as_bytes()).unwrap();
        pem.contents
    }

    fn fixture(not_after: DateTime<Utc>) -> LeafCertificate {
        LeafCertificate {
            issuer_organization: None,
            subject_common_name: None,
            not_before: not_after - Duration::days(90),
            not_after,
        }
    }

    #[test]
    fn test_parse_invalid_der() {
        let result = parse_leaf_certificate(&[0, 1, 2, 3]);
        assert!(matches!(result, Err(ScanError::Certificate(_))));
    }

    #[test]
    fn test_parse_utctime_certificate() {
        let der = der_from_pem(include_str!("../../tests/fixtures/leaf_utctime.pem"));
        let cert = parse_leaf_certificate(&der).unwrap();

        assert_eq!(cert.issuer_organization.as_deref(), Some("Breachless Test CA"));
        assert_eq!(cert.subject_common_name.as_deref(), Some("audit.breachless.test"));
        assert_eq!(
            cert.not_before.date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(
            cert.not_after,
            Utc.with_ymd_and_hms(2024, 4, 14, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_parse_generalized_time_certificate() {
        let der = der_from_pem(include_str!("../../tests/fixtures/leaf_generalized_time.pem"));
        let cert = parse_leaf_certificate(&der).unwrap();

        assert_eq!(
            cert.issuer_organization.as_deref(),
            Some("Breachless Long Lived CA")
        );
        assert_eq!(cert.subject_common_name, None);
        assert_eq!(
            cert.not_before,
            Utc.with_ymd_and_hms(2049, 6, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(
            cert.not_after,
            Utc.with_ymd_and_hms(2051, 3, 2, 8, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_certificate_without_names() {
        let der = der_from_pem(include_str!("../../tests/fixtures/leaf_no_names.pem"));
        let cert = parse_leaf_certificate(&der).unwrap();

        assert_eq!(cert.issuer_organization, None);
        assert_eq!(cert.subject_common_name, None);
    }

    #[test]
    fn test_days_remaining_exact_days() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        for n in [0, 1, 30, 89, 365] {
            assert_eq!(fixture(now + Duration::days(n)).days_remaining(now), n);
        }
    }

    #[test]
    fn test_days_remaining_partial_day_is_floored() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let cert = fixture(now + Duration::days(10) + Duration::hours(23));
        assert_eq!(cert.days_remaining(now), 10);
    }

    #[test]
    fn test_days_remaining_negative_when_expired() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(fixture(now - Duration::hours(1)).days_remaining(now), -1);
        assert_eq!(fixture(now - Duration::days(15)).days_remaining(now), -15);
    }
}
