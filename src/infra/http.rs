//! Outbound HTTP client construction.

use crate::config::ScanSettings;
use crate::error::ScanError;
use reqwest::redirect::Policy;

/// Builds the client used for the security header fetch.
///
/// The overall timeout covers connect, redirects and body. Redirects are
/// followed up to `max_redirects`; one more is reported as a fetch failure.
/// System proxies are bypassed so the audited headers come from the target.
pub fn create_http_client(settings: &ScanSettings) -> Result<reqwest::Client, ScanError> {
    reqwest::Client::builder()
        .timeout(settings.header_timeout)
        .redirect(Policy::limited(settings.max_redirects))
        .no_proxy()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ScanError::Client(e.to_string()))
}
