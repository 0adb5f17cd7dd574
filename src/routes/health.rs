//! Liveness endpoint

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}

/// GET / - Liveness check, never touches the upstream
async fn home() -> &'static str {
    tracing::info!("Endpoint Hit: /");
    "Healthy"
}
