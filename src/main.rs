use breachless::{config::Config, routes, LiveScanner};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "breachless=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        header_timeout = ?config.scan.header_timeout,
        tls_timeout = ?config.scan.tls_timeout,
        max_redirects = config.scan.max_redirects,
        "Starting Breachless API on port {}",
        config.port
    );

    let scanner = LiveScanner::arc(config.scan.clone()).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize scanner");
        std::io::Error::other(e.to_string())
    })?;

    let app = routes::router(scanner, &config.cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await
}
