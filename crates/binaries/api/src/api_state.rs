use app_state::AppSettings;
use axum::extract::FromRef;
use common_services::database::DocStore;
use std::sync::Arc;
use thumbnails::ThumbnailCache;

// The #[derive(Clone)] is crucial for Axum to share the state with all handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: DocStore,
    pub cache: ThumbnailCache,
    pub settings: Arc<AppSettings>,
}

// These impls allow Axum to extract the parts of the state individually,
// useful for extractors that only need one of them.
impl FromRef<ApiState> for DocStore {
    fn from_ref(state: &ApiState) -> Self {
        state.store.clone()
    }
}

impl FromRef<ApiState> for ThumbnailCache {
    fn from_ref(state: &ApiState) -> Self {
        state.cache.clone()
    }
}

impl FromRef<ApiState> for Arc<AppSettings> {
    fn from_ref(state: &ApiState) -> Self {
        state.settings.clone()
    }
}
