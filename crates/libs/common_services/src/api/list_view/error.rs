use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ListViewError {
    #[error("Database error")]
    Database(#[from] DbError),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_error(error: &ListViewError) {
    match error {
        ListViewError::Database(e) => warn!("Document store access failed: {}", e),
        ListViewError::Internal(e) => warn!("Internal error: {:?}", e),
    }
}

impl IntoResponse for ListViewError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A storage error occurred.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
