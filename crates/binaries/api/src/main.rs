mod api_state;
mod routes;

use crate::api_state::ApiState;
use crate::routes::create_router;
use app_state::load_app_settings;
use axum::routing::get_service;
use color_eyre::Result;
use common_services::database::DocStore;
use http::{HeaderValue, header};
use std::sync::Arc;
use thumbnails::{ImageCodec, ThumbnailCache};
use tower_http::compression::CompressionLayer;
use tower_http::cors;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,common_services=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    color_eyre::install()?;

    info!("🚀 Initializing server...");
    let settings = Arc::new(load_app_settings()?);
    let store = DocStore::file(settings.storage.data_file());
    let cache = ThumbnailCache::new(
        settings.storage.thumbnail_folder.clone(),
        settings.storage.thumbnails.max_dimension,
        Arc::new(ImageCodec),
    );

    // --- CORS Configuration ---
    let allowed_origins: Vec<HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(allowed_origins)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::PRAGMA,
        ]);

    // Static serving for the source photos and their thumbnails. Thumbnails
    // are keyed by item id and never change, so they can be cached forever.
    let serve_photos = ServeDir::new(&settings.storage.photo_folder);
    let serve_thumbs = ServeDir::new(&settings.storage.thumbnail_folder);
    let cache_layer = SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000, immutable"),
    );

    let api_settings = &settings.api;
    let listen_address = format!("{}:{}", api_settings.host, api_settings.port);

    let state = ApiState {
        store,
        cache,
        settings: settings.clone(),
    };
    let app = create_router(state)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(axum::extract::DefaultBodyLimit::max(
            api_settings.max_upload_bytes,
        ))
        .nest_service("/photos", get_service(serve_photos).layer(cache_layer.clone()))
        .nest_service("/thumbs", get_service(serve_thumbs).layer(cache_layer));

    let listener = tokio::net::TcpListener::bind(&listen_address).await?;

    info!("📚 Docs available at http://{listen_address}/docs");
    info!("✅ Server listening on http://{listen_address}");

    axum::serve(listener, app).await?;
    Ok(())
}
