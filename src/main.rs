//! Turnstile Gate - Main Application Entry Point
//!
//! This is a small HTTP service that fronts its routes with Cloudflare
//! Turnstile verification. Routes listed in `PROTECTED_ROUTES` require a
//! valid challenge token before their handlers run; everything else passes
//! through untouched.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Verification**: outbound POST to the Turnstile siteverify endpoint
//! - **Format**: JSON responses, form-encoded or header-borne tokens
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Construct the gate (compile rules, build the verification client)
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use turnstile_gate::{Config, TurnstileGate, handlers, turnstile_middleware};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Construct the gate. Fails fast on an empty secret or a bad endpoint;
    // a gate that cannot verify must not start serving.
    let gate = TurnstileGate::new(&config)?;
    tracing::info!(
        rules = config.protected_routes.len(),
        "Turnstile gate constructed"
    );

    let app = Router::new()
        // Liveness probe (leave it out of PROTECTED_ROUTES)
        .route("/health", get(handlers::health::health_check))
        // Demonstration route; protect it via PROTECTED_ROUTES
        .route("/api/submit", post(handlers::demo::submit))
        // Gate every route; the middleware itself decides which requests
        // are protected by matching against the configured rules
        .layer(axum_middleware::from_fn_with_state(
            gate,
            turnstile_middleware,
        ))
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http());

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
