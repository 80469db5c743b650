use chrono::NaiveDate;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

pub const HEADER_COUNT: usize = 6;

/// Response headers every audited site is expected to send, in report order.
pub const REQUIRED_HEADERS: [&str; HEADER_COUNT] = [
    "Content-Security-Policy",
    "Strict-Transport-Security",
    "X-Frame-Options",
    "X-Content-Type-Options",
    "Referrer-Policy",
    "Permissions-Policy",
];

/// Presence of a single required header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeaderStatus {
    Present,
    Missing,
}

/// Presence status for each of [`REQUIRED_HEADERS`], index for index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityHeaders {
    statuses: [HeaderStatus; HEADER_COUNT],
}

impl SecurityHeaders {
    pub fn new(statuses: [HeaderStatus; HEADER_COUNT]) -> Self {
        Self { statuses }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, HeaderStatus)> + '_ {
        REQUIRED_HEADERS.iter().copied().zip(self.statuses.iter().copied())
    }

    pub fn get(&self, header: &str) -> Option<HeaderStatus> {
        self.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(header))
            .map(|(_, status)| status)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn present_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| **s == HeaderStatus::Present)
            .count()
    }

    pub fn missing_count(&self) -> usize {
        self.len() - self.present_count()
    }
}

/// Serialized as a flat `{header name: status}` object in checklist order.
impl Serialize for SecurityHeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, status) in self.iter() {
            map.serialize_entry(name, &status)?;
        }
        map.end()
    }
}

/// Outcome of the security header inspection.
///
/// On the wire a fetch failure replaces the whole header mapping with a
/// single `error` entry, so consumers must check for it first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderCheckResult {
    Checked(SecurityHeaders),
    Failed { error: String },
}

impl HeaderCheckResult {
    pub fn headers(&self) -> Option<&SecurityHeaders> {
        match self {
            HeaderCheckResult::Checked(headers) => Some(headers),
            HeaderCheckResult::Failed { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, HeaderCheckResult::Failed { .. })
    }
}

/// Leaf certificate details reported after a successful handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDetails {
    pub issuer: String,
    pub subject: String,
    pub not_before: NaiveDate,
    pub not_after: NaiveDate,
    /// Negative once expired.
    pub days_remaining: i64,
}

/// Outcome of the TLS certificate inspection.
///
/// `Valid` means the handshake and chain verification succeeded. An expired
/// certificate that still verified is reported as `Valid` with a negative
/// `days_remaining`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateCheckResult {
    Valid(CertificateDetails),
    Invalid { error: String },
}

impl CertificateCheckResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, CertificateCheckResult::Valid(_))
    }
}

impl Serialize for CertificateCheckResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CertificateCheckResult::Valid(details) => {
                let mut s = serializer.serialize_struct("CertificateCheckResult", 6)?;
                s.serialize_field("valid", &true)?;
                s.serialize_field("issuer", &details.issuer)?;
                s.serialize_field("subject", &details.subject)?;
                s.serialize_field("not_before", &details.not_before)?;
                s.serialize_field("not_after", &details.not_after)?;
                s.serialize_field("days_remaining", &details.days_remaining)?;
                s.end()
            }
            CertificateCheckResult::Invalid { error } => {
                let mut s = serializer.serialize_struct("CertificateCheckResult", 2)?;
                s.serialize_field("valid", &false)?;
                s.serialize_field("error", error)?;
                s.end()
            }
        }
    }
}

/// Coarse A to F bucketing of the audit score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub total_headers_checked: usize,
    pub headers_missing: usize,
    pub ssl_valid: bool,
    pub score: u8,
    pub letter_grade: Grade,
}

/// Combined header and certificate report for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub domain: String,
    pub summary: AuditSummary,
    pub headers: HeaderCheckResult,
    pub ssl: CertificateCheckResult,
}

/// Body of `GET /scan/{domain}`
#[derive(Debug, Serialize)]
pub struct HeaderScanResponse {
    pub domain: String,
    pub headers: HeaderCheckResult,
}

/// Body of `GET /ssl/{domain}`
#[derive(Debug, Serialize)]
pub struct SslScanResponse {
    pub domain: String,
    pub ssl: CertificateCheckResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_result_serializes_in_checklist_order() {
        let headers = SecurityHeaders::new([
            HeaderStatus::Present,
            HeaderStatus::Missing,
            HeaderStatus::Present,
            HeaderStatus::Present,
            HeaderStatus::Missing,
            HeaderStatus::Missing,
        ]);
        let json = serde_json::to_string(&HeaderCheckResult::Checked(headers)).unwrap();
        assert_eq!(
            json,
            r#"{"Content-Security-Policy":"Present","Strict-Transport-Security":"Missing","X-Frame-Options":"Present","X-Content-Type-Options":"Present","Referrer-Policy":"Missing","Permissions-Policy":"Missing"}"#
        );
    }

    #[test]
    fn test_failed_header_result_has_only_error_key() {
        let result = HeaderCheckResult::Failed {
            error: "Could not fetch https://nope.invalid: dns".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"error": "Could not fetch https://nope.invalid: dns"})
        );
    }

    #[test]
    fn test_security_headers_counts_and_lookup() {
        let headers = SecurityHeaders::new([
            HeaderStatus::Missing,
            HeaderStatus::Present,
            HeaderStatus::Missing,
            HeaderStatus::Missing,
            HeaderStatus::Present,
            HeaderStatus::Missing,
        ]);
        assert_eq!(headers.present_count(), 2);
        assert_eq!(headers.missing_count(), 4);
        assert_eq!(
            headers.get("strict-transport-security"),
            Some(HeaderStatus::Present)
        );
        assert_eq!(headers.get("X-XSS-Protection"), None);
    }

    #[test]
    fn test_valid_certificate_serialization() {
        let result = CertificateCheckResult::Valid(CertificateDetails {
            issuer: "Let's Encrypt".to_string(),
            subject: "example.com".to_string(),
            not_before: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            not_after: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            days_remaining: -3,
        });
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "valid": true,
                "issuer": "Let's Encrypt",
                "subject": "example.com",
                "not_before": "2025-01-01",
                "not_after": "2025-04-01",
                "days_remaining": -3
            })
        );
    }

    #[test]
    fn test_invalid_certificate_serialization() {
        let result = CertificateCheckResult::Invalid {
            error: "Connection timed out".to_string(),
        };
        assert!(!result.is_valid());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"valid": false, "error": "Connection timed out"})
        );
    }
}
