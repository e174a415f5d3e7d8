mod admin;
mod analytics;
mod applications;
mod auth;
mod chat;
mod config;
mod db;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::fallback::RuleBasedResponder;
use crate::chat::location::default_location_matcher;
use crate::chat::responder::ChatResponder;
use crate::chat::store::PgChatStore;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Job Portal API v{} ({:?})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Chat responder: Postgres-backed store, default location matchers, rule-based
    // fallback, optional hosted model
    let mut chat = ChatResponder::new(
        Arc::new(PgChatStore::new(db.clone())),
        Arc::new(default_location_matcher()?),
        Arc::new(RuleBasedResponder),
        config.environment,
    );
    match config.anthropic_api_key.clone() {
        Some(key) => {
            let llm = LlmClient::new(key, config.llm_model.clone())?;
            info!("LLM client initialized (model: {})", config.llm_model);
            chat = chat.with_model(Arc::new(llm));
        }
        None => warn!("ANTHROPIC_API_KEY not set; chat runs in rule-based mode"),
    }

    let cors = match config.cors_origin.as_deref() {
        Some(origin) => CorsLayer::very_permissive().allow_origin(origin.parse::<HeaderValue>()?),
        None => CorsLayer::permissive(),
    };

    // Build app state
    let state = AppState {
        db,
        chat: Arc::new(chat),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
