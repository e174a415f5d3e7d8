use std::sync::Arc;

use sqlx::PgPool;

use crate::chat::responder::ChatResponder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Chat flow with its store, location matcher and optional hosted model already wired.
    pub chat: Arc<ChatResponder>,
}
