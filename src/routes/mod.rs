pub mod home;
pub mod scan;

use crate::audit::Scanner;
use crate::config::CorsSettings;
use axum::{
    http::{request::Parts, HeaderValue},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub scanner: Arc<dyn Scanner>,
}

/// Builds the CORS layer for the configured origins.
///
/// Credentials are allowed, so methods and headers are mirrored from the
/// preflight request instead of answered with a wildcard.
pub fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let settings = settings.clone();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| settings.is_allowed(o))
                    .unwrap_or(false)
            },
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Builds the application router.
pub fn router(scanner: Arc<dyn Scanner>, cors: &CorsSettings) -> Router {
    Router::new()
        .route("/", get(home::welcome))
        .route("/health", get(home::health_check))
        .route("/scan/:domain", get(scan::scan_domain))
        .route("/ssl/:domain", get(scan::ssl_scan))
        .route("/audit/:domain", get(scan::audit_domain))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors)),
        )
        .with_state(AppState { scanner })
}
