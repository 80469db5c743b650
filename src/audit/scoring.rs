//! Weighted score and letter grade for an audit.

use super::types::{AuditSummary, CertificateCheckResult, Grade, HeaderCheckResult};

/// Points available from the header checklist.
pub const HEADER_WEIGHT: usize = 60;
/// Points awarded for a certificate that passed the handshake.
pub const SSL_WEIGHT: usize = 40;

impl Grade {
    /// Maps a score onto a grade; lower bounds are inclusive.
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

/// Header contribution, floored. A failed fetch scores 0.
pub fn header_score(headers: &HeaderCheckResult) -> usize {
    match headers.headers() {
        Some(checked) if !checked.is_empty() => {
            checked.present_count() * HEADER_WEIGHT / checked.len()
        }
        _ => 0,
    }
}

pub fn ssl_score(ssl: &CertificateCheckResult) -> usize {
    if ssl.is_valid() {
        SSL_WEIGHT
    } else {
        0
    }
}

/// Total score in `0..=100`.
pub fn total_score(headers: &HeaderCheckResult, ssl: &CertificateCheckResult) -> u8 {
    let total = (header_score(headers) + ssl_score(ssl)).min(HEADER_WEIGHT + SSL_WEIGHT);
    // bounded by 100 above
    total as u8
}

/// Builds the report summary. A failed header fetch counts as zero headers checked.
pub fn summarize(headers: &HeaderCheckResult, ssl: &CertificateCheckResult) -> AuditSummary {
    let (total_headers_checked, headers_missing) = headers
        .headers()
        .map(|checked| (checked.len(), checked.missing_count()))
        .unwrap_or((0, 0));
    let score = total_score(headers, ssl);

    AuditSummary {
        total_headers_checked,
        headers_missing,
        ssl_valid: ssl.is_valid(),
        score,
        letter_grade: Grade::from_score(score),
    }
}
