mod config;
mod dictionary;
mod game;
mod models;
mod routes;
mod session;
mod utils;
mod websocket;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use config::Config;
use dictionary::{Dictionary, WordPool};
use session::GameRegistry;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    /// Running games keyed by game code
    pub games: GameRegistry,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codenames_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Codenames backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Board words are required
    let words = WordPool::load(&config.game.word_list_path)
        .await
        .context("a board word list is required")?;
    if words.len() < game::BOARD_SIZE {
        tracing::warn!(
            "Word list has only {} words, games will fail to start (need {})",
            words.len(),
            game::BOARD_SIZE
        );
    }

    // Clue dictionary is required
    let dictionary = Dictionary::load(&config.game.dictionary_path)
        .await
        .context("a clue dictionary is required")?;

    // Create application state
    let state = Arc::new(AppState {
        games: GameRegistry::new(
            Arc::new(words),
            Arc::new(dictionary),
            config.game.max_games,
        ),
        config: config.clone(),
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Serve the web client
    let frontend_service = ServeDir::new(&config.server.static_dir);

    // Build router
    let app = Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        // API routes
        .merge(routes::create_routes())
        .fallback_service(frontend_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
