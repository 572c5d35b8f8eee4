use crate::api_state::ApiState;
use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use common_services::api::items::error::ItemsError;
use common_services::api::items::interfaces::{
    BulkUploadResponse, ItemSummary, UpdateCaptionRequest, UploadedFile,
};
use common_services::api::items::service;

/// Upload one or more photos.
///
/// Expects `multipart/form-data` with any number of `photos` file parts and
/// optional `caption` and `collection` text parts applied to the whole
/// batch. Files are saved independently; the response reports how many made
/// it.
#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    responses(
        (status = 200, description = "Batch processed.", body = BulkUploadResponse),
        (status = 400, description = "Malformed multipart request."),
        (status = 500, description = "A storage or internal error occurred."),
    )
)]
pub async fn bulk_upload_handler(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Json<BulkUploadResponse>, ItemsError> {
    let mut caption = String::new();
    let mut collection: Option<String> = None;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ItemsError::BadRequest(e.to_string()))?
    {
        // The field name borrow must end before the field itself is consumed.
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "caption" => {
                caption = field
                    .text()
                    .await
                    .map_err(|e| ItemsError::BadRequest(e.to_string()))?;
            }
            "collection" => {
                collection = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ItemsError::BadRequest(e.to_string()))?,
                );
            }
            "photos" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ItemsError::BadRequest(e.to_string()))?;
                files.push(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let saved = service::create_items(
        &state.store,
        &state.settings.storage,
        &state.cache,
        &caption,
        collection.as_deref(),
        files,
    )
    .await?;
    Ok(Json(BulkUploadResponse {
        saved_count: saved.len(),
        ids: saved.into_iter().map(|item| item.id).collect(),
    }))
}

/// List all items, newest first.
#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    responses(
        (status = 200, description = "All items.", body = Vec<ItemSummary>),
        (status = 500, description = "A storage or internal error occurred."),
    )
)]
pub async fn get_items_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<ItemSummary>>, ItemsError> {
    let items = service::list_items(&state.store).await?;
    Ok(Json(items))
}

/// Update an item's caption.
///
/// Under the default lenient policy an unknown item id is a no-op success.
#[utoipa::path(
    put,
    path = "/items/{item_id}/caption",
    tag = "Items",
    params(
        ("item_id" = String, Path, description = "The unique ID of the item.")
    ),
    request_body = UpdateCaptionRequest,
    responses(
        (status = 204, description = "Caption updated."),
        (status = 404, description = "Item not found (strict policy only)."),
        (status = 500, description = "A storage or internal error occurred."),
    )
)]
pub async fn update_caption_handler(
    State(state): State<ApiState>,
    Path(item_id): Path<String>,
    Json(payload): Json<UpdateCaptionRequest>,
) -> Result<StatusCode, ItemsError> {
    service::update_caption(
        &state.store,
        state.settings.behavior.write_policy,
        &item_id,
        &payload.caption,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an item.
///
/// Removes the stored photo and thumbnail (best effort) and every vote
/// referencing the item from every list.
#[utoipa::path(
    delete,
    path = "/items/{item_id}",
    tag = "Items",
    params(
        ("item_id" = String, Path, description = "The unique ID of the item.")
    ),
    responses(
        (status = 204, description = "Item deleted."),
        (status = 404, description = "Item not found."),
        (status = 500, description = "A storage or internal error occurred."),
    )
)]
pub async fn delete_item_handler(
    State(state): State<ApiState>,
    Path(item_id): Path<String>,
) -> Result<StatusCode, ItemsError> {
    service::delete_item(&state.store, &state.settings.storage, &item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
