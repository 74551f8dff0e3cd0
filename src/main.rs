//! HealthPal - health-triage assistant
//!
//! A Rust backend running a conversation session and a symptom triage
//! wizard as state machines behind a JSON/SSE API.

mod api;
mod classifier;
mod config;
mod generator;
mod runtime;
mod session;
mod wizard;

use api::{create_router, AppState};
use config::AppConfig;
use runtime::Engine;
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "healthpal=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env();
    tracing::info!(
        port = config.port,
        model = %config.generator.model,
        analysis_delay_ms = %config.analysis_delay.as_millis(),
        "Configuration loaded"
    );

    // Start the session and wizard runtimes
    let state = AppState::new(Engine::start(&config));

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("HealthPal server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
