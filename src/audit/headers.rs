//! Security header inspection.

use super::types::{HeaderCheckResult, HeaderStatus, SecurityHeaders, REQUIRED_HEADERS};
use crate::error::ScanError;
use crate::shared::normalize_url;
use reqwest::header::HeaderMap;

/// Records which of [`REQUIRED_HEADERS`] appear in `headers`.
///
/// Names are compared case-insensitively; values are ignored.
pub fn evaluate_headers(headers: &HeaderMap) -> SecurityHeaders {
    SecurityHeaders::new(REQUIRED_HEADERS.map(|required| {
        if headers
            .keys()
            .any(|name| name.as_str().eq_ignore_ascii_case(required))
        {
            HeaderStatus::Present
        } else {
            HeaderStatus::Missing
        }
    }))
}

async fn fetch_headers(client: &reqwest::Client, url: &str) -> Result<HeaderMap, ScanError> {
    let response = client.get(url).send().await.map_err(|source| ScanError::Fetch {
        url: url.to_string(),
        source,
    })?;

    tracing::debug!(url = %url, final_url = %response.url(), status = %response.status(), "Fetched headers");

    Ok(response.headers().clone())
}

/// Fetches `domain` once and checks its response for the required headers.
///
/// Timeout and redirect limits come from the client. Any transport failure
/// yields [`HeaderCheckResult::Failed`]; the status code is not inspected.
pub async fn check_security_headers(client: &reqwest::Client, domain: &str) -> HeaderCheckResult {
    let url = normalize_url(domain);

    match fetch_headers(client, &url).await {
        Ok(headers) => HeaderCheckResult::Checked(evaluate_headers(&headers)),
        Err(e) => {
            tracing::warn!(domain = %domain, error = %e, "Header fetch failed");
            HeaderCheckResult::Failed {
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderName, HeaderValue};

    fn header_map(names: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for name in names {
            map.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_static("x"),
            );
        }
        map
    }

    #[test]
    fn test_all_required_headers_present() {
        let headers = evaluate_headers(&header_map(&REQUIRED_HEADERS));
        assert_eq!(headers.present_count(), 6);
        assert!(headers.iter().all(|(_, s)| s == HeaderStatus::Present));
    }

    #[test]
    fn test_empty_response_marks_everything_missing() {
        let headers = evaluate_headers(&HeaderMap::new());
        assert_eq!(headers.missing_count(), 6);
    }

    #[test]
    fn test_names_match_case_insensitively() {
        let headers = evaluate_headers(&header_map(&[
            "content-security-policy",
            "STRICT-TRANSPORT-SECURITY",
            "x-FRAME-options",
        ]));
        assert_eq!(headers.get("Content-Security-Policy"), Some(HeaderStatus::Present));
        assert_eq!(headers.get("Strict-Transport-Security"), Some(HeaderStatus::Present));
        assert_eq!(headers.get("X-Frame-Options"), Some(HeaderStatus::Present));
        assert_eq!(headers.get("Referrer-Policy"), Some(HeaderStatus::Missing));
    }

    #[test]
    fn test_every_combination_of_required_headers() {
        for mask in 0u32..(1 << REQUIRED_HEADERS.len()) {
            let sent: Vec<String> = REQUIRED_HEADERS
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(i, name)| {
                    // alternate casing so both forms are exercised
                    if i % 2 == 0 {
                        name.to_lowercase()
                    } else {
                        name.to_uppercase()
                    }
                })
                .collect();
            let names: Vec<&str> = sent.iter().map(String::as_str).collect();
            let headers = evaluate_headers(&header_map(&names));

            for (i, (name, status)) in headers.iter().enumerate() {
                let expected = if mask & (1 << i) != 0 {
                    HeaderStatus::Present
                } else {
                    HeaderStatus::Missing
                };
                assert_eq!(status, expected, "mask {:06b}, header {}", mask, name);
            }
        }
    }

    #[test]
    fn test_unrelated_headers_ignored() {
        let headers = evaluate_headers(&header_map(&["server", "x-xss-protection", "content-type"]));
        assert_eq!(headers.present_count(), 0);
    }
}
