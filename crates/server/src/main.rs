use std::sync::Arc;

use server::config;
use server::routes;
use server::state::AppState;

use axum::{routing::get, Extension, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();
    let state = Arc::new(AppState::from_config(&config)?);

    if state.evaluator.is_some() {
        tracing::info!(
            stockfish_path = %config.engine.stockfish_path,
            depth = config.engine.depth,
            sessions = config.engine.sessions,
            "Blunder checks enabled"
        );
    } else {
        tracing::info!("Blunder checks disabled");
    }

    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/month", get(routes::month::get_month))
        .route("/api/users/{username}/exists", get(routes::users::user_exists))
        .layer(Extension(state))
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
