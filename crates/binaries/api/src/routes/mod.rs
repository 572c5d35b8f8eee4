pub mod collections;
pub mod items;
pub mod lists;
pub mod root;

use crate::api_state::ApiState;
use crate::routes::collections::handlers::{create_collection_handler, get_collections_handler};
use crate::routes::items::handlers::{
    bulk_upload_handler, delete_item_handler, get_items_handler, update_caption_handler,
};
use crate::routes::lists::handlers::{
    create_list_handler, get_list_view_handler, get_lists_handler, record_vote_handler,
};
use crate::routes::root::handlers::root;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::{LatencyUnit, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

// --- API Documentation ---
#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        // --- Item handlers ---
        items::handlers::bulk_upload_handler,
        items::handlers::get_items_handler,
        items::handlers::update_caption_handler,
        items::handlers::delete_item_handler,
        // --- List handlers ---
        lists::handlers::create_list_handler,
        lists::handlers::get_lists_handler,
        lists::handlers::record_vote_handler,
        lists::handlers::get_list_view_handler,
        // --- Collection handlers ---
        collections::handlers::get_collections_handler,
        collections::handlers::create_collection_handler,
    ),
    components(
        schemas(
            common_types::Item,
            common_types::Vote,
            common_types::VoteChoice,
            common_services::api::items::interfaces::ItemSummary,
            common_services::api::items::interfaces::UpdateCaptionRequest,
            common_services::api::items::interfaces::BulkUploadResponse,
            common_services::api::lists::interfaces::RecordVoteRequest,
            common_services::api::list_view::interfaces::ListViewItem,
            common_services::api::collections::interfaces::CreateCollectionRequest,
            common_services::api::collections::interfaces::CollectionsResponse,
        ),
    ),
    tags(
        (name = "Root", description = "Service health"),
        (name = "Items", description = "Endpoints for uploading and managing photos"),
        (name = "Lists", description = "Endpoints for voting lists and aggregated views"),
        (name = "Collections", description = "Endpoints for collection names used to group items")
    )
)]
struct ApiDoc;

// --- Router Construction ---
pub fn create_router(state: ApiState) -> Router {
    let openapi = ApiDoc::openapi();

    Router::new()
        .merge(Scalar::with_url("/docs", openapi))
        .merge(api_routes())
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().on_response(
                tower_http::trace::DefaultOnResponse::new()
                    .level(tracing::Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
        )
}

fn api_routes() -> Router<ApiState> {
    Router::new()
        .route("/", get(root))
        .merge(item_routes())
        .merge(list_routes())
        .merge(collection_routes())
}

fn item_routes() -> Router<ApiState> {
    Router::new()
        .route("/items", get(get_items_handler).post(bulk_upload_handler))
        .route("/items/{item_id}/caption", put(update_caption_handler))
        .route("/items/{item_id}", delete(delete_item_handler))
}

fn list_routes() -> Router<ApiState> {
    Router::new()
        .route("/lists", get(get_lists_handler))
        .route("/lists/{name}", post(create_list_handler))
        .route("/lists/{name}/votes", post(record_vote_handler))
        .route("/lists/{name}/view", get(get_list_view_handler))
}

fn collection_routes() -> Router<ApiState> {
    Router::new().route(
        "/collections",
        get(get_collections_handler).post(create_collection_handler),
    )
}
