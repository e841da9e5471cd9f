//! FreeToGame Explorer Backend
//!
//! Serves the explorer state over REST and fetches the game catalog directly or through
//! a chain of CORS relays.

mod api;
mod config;
mod errors;
mod explorer;
mod fetch;
mod models;
mod search;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use explorer::Explorer;
use fetch::CatalogClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub explorer: Arc<Explorer>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FreeToGame Explorer Backend");
    tracing::info!("Catalog endpoint: {}", config.endpoint);
    for (index, strategy) in config.strategies.iter().enumerate() {
        tracing::info!("Access strategy {}: {}", index, strategy);
    }
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.mock_mode {
        tracing::warn!("Mock mode enabled (FTG_MOCK_MODE). Serving sample data only!");
    }

    let client = CatalogClient::new(
        config.endpoint.clone(),
        config.strategies.clone(),
        config.request_timeout,
    )?;
    let explorer = Arc::new(Explorer::new(Arc::new(client), config.mock_mode));

    if config.initial_load {
        let explorer = Arc::clone(&explorer);
        tokio::spawn(async move {
            if let Some(games) = explorer.fetch_games(false).await {
                tracing::info!("Initial load returned {} games", games.len());
            }
        });
    }

    // Create application state
    let state = AppState {
        explorer: Arc::clone(&explorer),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    explorer.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Options and state
        .route("/options", get(api::get_options))
        .route("/state", get(api::get_state))
        // Games
        .route("/games", get(api::list_games))
        .route("/games/load", post(api::load_games))
        .route("/games/{id}", get(api::get_game))
        // Selections
        .route("/filters", put(api::update_filters))
        .route("/search", put(api::update_search))
        .route("/mock-mode", put(api::set_mock_mode))
        .route("/reset", post(api::reset))
        // Diagnostics
        .route("/fetch/report", get(api::get_fetch_report))
        .route("/fetch/strategies", get(api::get_strategies))
        .route(
            "/self-test",
            get(api::get_self_test)
                .post(api::run_self_test)
                .delete(api::clear_self_test),
        );

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Resolve when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
