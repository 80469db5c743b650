//! Turning a user-supplied domain into something an inspector can dial.

use crate::error::ScanError;

fn has_http_scheme(domain: &str) -> bool {
    domain.starts_with("https://") || domain.starts_with("http://")
}

/// Prepends `https://` unless the input already carries an `http://` or
/// `https://` scheme.
///
/// Nothing else is validated; a malformed target is left for the HTTP
/// client to reject.
pub fn normalize_url(domain: &str) -> String {
    if has_http_scheme(domain) {
        domain.to_string()
    } else {
        format!("https://{}", domain)
    }
}

/// Extracts the bare hostname used for SNI and the TLS connection.
///
/// Scheme, userinfo, port and path are all dropped. An existing `http://`
/// prefix is replaced rather than nested under `https://`.
pub fn extract_hostname(domain: &str) -> Result<String, ScanError> {
    let rest = domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(domain);

    let parsed = url::Url::parse(&format!("https://{}", rest))
        .map_err(|e| ScanError::InvalidHost(format!("{}: {}", domain, e)))?;

    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ScanError::InvalidHost(domain.to_string()))?;

    // IPv6 literals come back bracketed
    Ok(host.trim_start_matches('[').trim_end_matches(']').to_string())
}
