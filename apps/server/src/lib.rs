pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{MemoryStore, NewWord, SystemClock, WordStore};

use crate::config::ServerConfig;
pub use crate::state::AppState;

/// Build the API router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Word routes
        .route("/api/words", get(routes::words::list).post(routes::words::import))
        .route("/api/words/due", get(routes::words::due))
        .route("/api/words/review", post(routes::words::review))
        // Learning path routes
        .route("/api/path/stats", get(routes::path::stats))
        .route("/api/path/recommendation", get(routes::path::recommendation))
        .route("/api/path/queues", get(routes::path::queues))
        // Session routes
        .route("/api/session", get(routes::session::current).post(routes::session::start))
        .route("/api/session/preview/next", post(routes::session::preview_next))
        .route("/api/session/quiz/answer", post(routes::session::quiz_answer))
        .route("/api/session/quiz/next", post(routes::session::quiz_next))
        .route("/api/session/deep/answer", post(routes::session::deep_answer))
        .route("/api/session/deep/skip", post(routes::session::deep_skip))
        .route("/api/session/finish", post(routes::session::finish))
        // Score routes
        .route("/api/score", get(routes::score::estimate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let store = Arc::new(MemoryStore::new());
    if let Some(path) = &config.words_path {
        let words = load_word_file(path)?;
        tracing::info!(count = words.len(), path = %path.display(), "importing word list");
        let words: Vec<_> = words.into_iter().map(NewWord::into_word).collect();
        store.save_words(&words)?;
    }

    let state = AppState::new(store, Arc::new(SystemClock), config.engine.clone(), config.rng_seed);
    let app = router(state);

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn load_word_file(path: &Path) -> anyhow::Result<Vec<NewWord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read word list {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse word list {}", path.display()))
}

async fn health_check() -> &'static str {
    "OK"
}
