use axum::{
    extract::{Path, State},
    Json,
};

use super::AppState;
use crate::audit::{full_audit, AuditReport, HeaderScanResponse, SslScanResponse};

/// Security header scan, e.g. `/scan/example.com`.
pub async fn scan_domain(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Json<HeaderScanResponse> {
    tracing::debug!(domain = %domain, "Scanning security headers");

    let headers = state.scanner.scan_headers(&domain).await;

    Json(HeaderScanResponse { domain, headers })
}

/// TLS certificate check, e.g. `/ssl/example.com`.
pub async fn ssl_scan(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Json<SslScanResponse> {
    tracing::debug!(domain = %domain, "Checking TLS certificate");

    let ssl = state.scanner.scan_certificate(&domain).await;

    Json(SslScanResponse { domain, ssl })
}

/// Full audit, e.g. `/audit/example.com`.
pub async fn audit_domain(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Json<AuditReport> {
    tracing::debug!(domain = %domain, "Running full audit");

    let report = full_audit(state.scanner.as_ref(), &domain).await;

    if report.headers.is_error() || !report.ssl.is_valid() {
        tracing::warn!(domain = %domain, score = report.summary.score, "Audit finished with failed checks");
    }

    Json(report)
}
