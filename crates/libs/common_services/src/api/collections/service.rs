use crate::api::collections::error::CollectionsError;
use crate::database::DocStore;
use std::collections::BTreeSet;
use tracing::instrument;

/// Registers a collection name. Idempotent, like list creation.
#[instrument(skip(store))]
pub async fn create_collection(store: &DocStore, name: &str) -> Result<(), CollectionsError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CollectionsError::EmptyName);
    }
    store
        .update(|doc| {
            doc.collections.entry(name.to_string()).or_default();
        })
        .await?;
    Ok(())
}

/// Known collection names, sorted: the explicit registry plus every name
/// referenced by an item, so grouping keys used by uploads are always
/// discoverable even when never explicitly registered.
#[instrument(skip(store))]
pub async fn list_collections(store: &DocStore) -> Result<Vec<String>, CollectionsError> {
    let document = store.load().await?;
    let mut names: BTreeSet<String> = document.collections.keys().cloned().collect();
    names.extend(
        document
            .items
            .values()
            .filter_map(|item| item.collection.clone()),
    );
    Ok(names.into_iter().collect())
}
