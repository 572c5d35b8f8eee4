use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ListsError {
    #[error("Database error")]
    Database(#[from] DbError),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("List name must not be empty")]
    EmptyName,

    #[error("Not found: {0}")]
    NotFound(String),
}

fn log_error(error: &ListsError) {
    match error {
        ListsError::Database(e) => warn!("Document store access failed: {}", e),
        ListsError::Internal(e) => warn!("Internal error: {:?}", e),
        ListsError::EmptyName => {
            warn!("Lists -> Rejected empty list name");
        }
        ListsError::NotFound(name) => {
            warn!("Lists -> List not found: {}", name);
        }
    }
}

impl IntoResponse for ListsError {
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
            Self::EmptyName => (
                StatusCode::BAD_REQUEST,
                "List name must not be empty.".to_string(),
            ),
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, format!("List not found: {message}"))
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
