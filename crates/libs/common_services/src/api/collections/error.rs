use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum CollectionsError {
    #[error("Database error")]
    Database(#[from] DbError),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Collection name must not be empty")]
    EmptyName,
}

fn log_error(error: &CollectionsError) {
    match error {
        CollectionsError::Database(e) => warn!("Document store access failed: {}", e),
        CollectionsError::Internal(e) => warn!("Internal error: {:?}", e),
        CollectionsError::EmptyName => {
            warn!("Collections -> Rejected empty collection name");
        }
    }
}

impl IntoResponse for CollectionsError {
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
                "Collection name must not be empty.".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
