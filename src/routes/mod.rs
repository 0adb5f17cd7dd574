pub mod decode;
pub mod health;
pub mod location;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roomcal_core::RoomCalError;

use crate::state::AppState;

/// All routes, with state attached.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(location::router())
        .with_state(state)
}

/// Handler failures. Every variant becomes a 500 with a plain-text message.
#[derive(Debug)]
pub enum AppError {
    Decode(anyhow::Error),
    Download(RoomCalError),
    Filter(RoomCalError),
    Xml(RoomCalError),
}

impl AppError {
    fn message(&self) -> String {
        match self {
            AppError::Decode(_) => "Failed to decode location id".to_string(),
            AppError::Download(_) => "Failed to download iCal file".to_string(),
            AppError::Filter(e) => format!("Failed to filter events: {e}"),
            AppError::Xml(e) => format!("Failed to generate XML: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Decode(e) => tracing::error!(error = %e, "Failed to decode location id"),
            AppError::Download(e) | AppError::Filter(e) | AppError::Xml(e) => {
                tracing::error!(error = %e, "Request failed")
            }
        }
        (StatusCode::INTERNAL_SERVER_ERROR, self.message()).into_response()
    }
}

/// Classify core errors by the pipeline stage they come from.
impl From<RoomCalError> for AppError {
    fn from(err: RoomCalError) -> Self {
        match err {
            e if e.is_fetch() => AppError::Download(e),
            e @ RoomCalError::XmlEncode(_) => AppError::Xml(e),
            e => AppError::Filter(e),
        }
    }
}
