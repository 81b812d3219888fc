mod config;
mod dictionary;
mod game;
mod models;
mod routes;
mod session;
mod websocket;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::{routing::get, Router};
use config::Config;
use dictionary::WordList;
use session::SessionStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often idle sessions are swept
pub const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(30);

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub words: WordList,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, words: WordList) -> Self {
        Self {
            config,
            words,
            sessions: SessionStore::new(),
        }
    }
}

/// Build the HTTP + WebSocket router
pub fn build_router(state: Arc<AppState>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        // API routes
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_stack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Word Stack server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load word list; a missing list is not fatal but no round can be dealt
    let words = match WordList::load(&config.game.dictionary_path, config.game.word_length).await
    {
        Ok(words) => words,
        Err(e) => {
            tracing::warn!("Could not load dictionary: {:#}. Using empty word list.", e);
            WordList::empty(config.game.word_length)
        }
    };
    if words.len() < 2 {
        tracing::warn!(
            "Only {} words of length {} available, rounds cannot be started",
            words.len(),
            words.word_length()
        );
    }

    let state = Arc::new(AppState::new(config.clone(), words));

    // Spawn background task to evict idle sessions
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        session_cleanup_task(cleanup_state).await;
    });

    let app = build_router(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Background task that periodically removes sessions nobody has touched
async fn session_cleanup_task(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
    let max_idle = state.config.session_idle_timeout();

    loop {
        interval.tick().await;

        for session_id in state.sessions.evict_idle(max_idle) {
            tracing::info!("Removed idle session {} (idle timeout expired)", session_id);
        }
    }
}
