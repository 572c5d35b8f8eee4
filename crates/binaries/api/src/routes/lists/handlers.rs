use crate::api_state::ApiState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common_services::api::list_view::error::ListViewError;
use common_services::api::list_view::interfaces::ListView;
use common_services::api::list_view::service as list_view_service;
use common_services::api::lists::error::ListsError;
use common_services::api::lists::interfaces::RecordVoteRequest;
use common_services::api::lists::service;
use common_types::VoteMap;
use std::collections::BTreeMap;

/// Create a voting list.
///
/// The trimmed name is the list's identity; creating an existing list is a
/// no-op success and leaves its votes untouched.
#[utoipa::path(
    post,
    path = "/lists/{name}",
    tag = "Lists",
    params(
        ("name" = String, Path, description = "The list name.")
    ),
    responses(
        (status = 201, description = "List created (or already existed)."),
        (status = 400, description = "The name is empty."),
        (status = 500, description = "A storage or internal error occurred."),
    )
)]
pub async fn create_list_handler(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ListsError> {
    service::create_list(&state.store, &name).await?;
    Ok(StatusCode::CREATED)
}

/// All lists with their raw vote maps.
#[utoipa::path(
    get,
    path = "/lists",
    tag = "Lists",
    responses(
        (status = 200, description = "List name mapped to its votes by item id."),
        (status = 500, description = "A storage or internal error occurred."),
    )
)]
pub async fn get_lists_handler(
    State(state): State<ApiState>,
) -> Result<Json<BTreeMap<String, VoteMap>>, ListsError> {
    let lists = service::get_lists(&state.store).await?;
    Ok(Json(lists))
}

/// Record a vote on an item within a list.
///
/// A later vote for the same item overwrites the earlier one. Under the
/// default lenient policy a vote for an unknown list is dropped silently.
#[utoipa::path(
    post,
    path = "/lists/{name}/votes",
    tag = "Lists",
    params(
        ("name" = String, Path, description = "The list name.")
    ),
    request_body = RecordVoteRequest,
    responses(
        (status = 204, description = "Vote recorded (or dropped leniently)."),
        (status = 404, description = "List not found (strict policy only)."),
        (status = 500, description = "A storage or internal error occurred."),
    )
)]
pub async fn record_vote_handler(
    State(state): State<ApiState>,
    Path(name): Path<String>,
    Json(payload): Json<RecordVoteRequest>,
) -> Result<StatusCode, ListsError> {
    service::record_vote(
        &state.store,
        state.settings.behavior.write_policy,
        &name,
        &payload.item,
        payload.choice,
        &payload.comment,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The aggregated view of a list.
///
/// Items are joined with their votes, grouped by collection and annotated
/// with the other lists that also want them. An unknown list yields an
/// empty view.
#[utoipa::path(
    get,
    path = "/lists/{name}/view",
    tag = "Lists",
    params(
        ("name" = String, Path, description = "The list name.")
    ),
    responses(
        (status = 200, description = "Collection name mapped to joined item records."),
        (status = 500, description = "A storage or internal error occurred."),
    )
)]
pub async fn get_list_view_handler(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<Json<ListView>, ListViewError> {
    let view = list_view_service::get_list_view(
        &state.store,
        &state.settings.storage,
        &state.cache,
        &name,
    )
    .await?;
    Ok(Json(view))
}
