use server::clients::eval_provider::EvalClient;
use server::clients::lichess::LichessClient;
use server::config;
use server::routes;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    // Clients are constructed once here and injected into handlers;
    // nothing else in the process owns an HTTP client.
    let eval_client = EvalClient::new(&config.eval_api_url);
    let lichess_client = LichessClient::new(&config.lichess_api_url);

    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Health
        .route("/health", get(routes::health::health_check))
        // Analysis
        .route("/api/analysis/game", post(routes::analysis::analyze_game))
        .route("/api/analysis/deep", post(routes::analysis::deep_analysis))
        // Tips
        .route("/api/tips", post(routes::tips::get_tips))
        // Shared state
        .layer(Extension(config.clone()))
        .layer(Extension(eval_client))
        .layer(Extension(lichess_client))
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
