use crate::api_state::ApiState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common_services::api::collections::error::CollectionsError;
use common_services::api::collections::interfaces::{
    CollectionsResponse, CreateCollectionRequest,
};
use common_services::api::collections::service;

/// All known collection names.
///
/// Includes both explicitly created collections and names referenced by
/// uploaded items.
#[utoipa::path(
    get,
    path = "/collections",
    tag = "Collections",
    responses(
        (status = 200, description = "Known collection names, sorted.", body = CollectionsResponse),
        (status = 500, description = "A storage or internal error occurred."),
    )
)]
pub async fn get_collections_handler(
    State(state): State<ApiState>,
) -> Result<Json<CollectionsResponse>, CollectionsError> {
    let collections = service::list_collections(&state.store).await?;
    Ok(Json(CollectionsResponse { collections }))
}

/// Register a collection name. Idempotent.
#[utoipa::path(
    post,
    path = "/collections",
    tag = "Collections",
    request_body = CreateCollectionRequest,
    responses(
        (status = 201, description = "Collection registered (or already existed)."),
        (status = 400, description = "The name is empty."),
        (status = 500, description = "A storage or internal error occurred."),
    )
)]
pub async fn create_collection_handler(
    State(state): State<ApiState>,
    Json(payload): Json<CreateCollectionRequest>,
) -> Result<StatusCode, CollectionsError> {
    service::create_collection(&state.store, &payload.name).await?;
    Ok(StatusCode::CREATED)
}
