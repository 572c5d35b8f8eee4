use super::interfaces::{ItemSummary, UploadedFile};
use crate::api::items::error::ItemsError;
use crate::database::DocStore;
use crate::utils::nice_id;
use app_state::{StorageSettings, constants};
use chrono::Utc;
use color_eyre::eyre;
use common_types::{Item, WritePolicy};
use std::io::ErrorKind;
use std::path::Path;
use thumbnails::ThumbnailCache;
use tokio::task;
use tracing::{info, instrument, warn};

/// Stores a batch of uploaded photos and returns the saved items.
///
/// Files are processed independently: a file whose extension is not accepted
/// or whose thumbnail cannot be generated is skipped without failing the
/// batch, so the result only holds items that were saved. The document is
/// written once for the whole batch.
#[instrument(skip(store, storage, cache, caption, files))]
pub async fn create_items(
    store: &DocStore,
    storage: &StorageSettings,
    cache: &ThumbnailCache,
    caption: &str,
    collection: Option<&str>,
    files: Vec<UploadedFile>,
) -> Result<Vec<Item>, ItemsError> {
    let collection = collection
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from);

    let mut saved = Vec::new();
    for file in files {
        if let Some(item) = store_file(storage, cache, caption, collection.clone(), file).await? {
            saved.push(item);
        }
    }

    if !saved.is_empty() {
        let inserts = saved.clone();
        store
            .update(move |doc| {
                for item in inserts {
                    doc.items.insert(item.id.clone(), item);
                }
            })
            .await?;
    }
    info!("Saved {} uploaded photo(s)", saved.len());
    Ok(saved)
}

/// Writes one uploaded file and its thumbnail. `None` means the file was
/// skipped (bad extension or thumbnail soft-failure), not that it failed.
async fn store_file(
    storage: &StorageSettings,
    cache: &ThumbnailCache,
    caption: &str,
    collection: Option<String>,
    file: UploadedFile,
) -> Result<Option<Item>, ItemsError> {
    let Some(extension) = Path::new(&file.file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
    else {
        warn!("Skipping upload without a file extension: {}", file.file_name);
        return Ok(None);
    };
    if !storage.photo_extensions.contains(&extension) {
        warn!("Skipping upload with unsupported extension: {}", file.file_name);
        return Ok(None);
    }

    let id = format!(
        "{}.{extension}",
        nice_id(constants().database.item_id_length)
    );
    let photo_path = storage.photo_path(&id);
    tokio::fs::write(&photo_path, &file.bytes)
        .await
        .map_err(eyre::Report::new)?;

    let blocking_cache = cache.clone();
    let source = photo_path.clone();
    let thumbnail = task::spawn_blocking(move || blocking_cache.ensure(&source)).await?;
    if thumbnail.is_none() {
        // The item was never saved, so the raw file must not linger either.
        remove_existing_file(&photo_path);
        return Ok(None);
    }

    Ok(Some(Item {
        id,
        caption: caption.to_string(),
        collection,
        created_at: Utc::now(),
    }))
}

/// All items, newest first.
#[instrument(skip(store))]
pub async fn list_items(store: &DocStore) -> Result<Vec<ItemSummary>, ItemsError> {
    let document = store.load().await?;
    let mut items: Vec<ItemSummary> = document
        .items
        .into_values()
        .map(|item| ItemSummary {
            thumbnail: ThumbnailCache::relative_ref(&item.id),
            id: item.id,
            caption: item.caption,
            collection: item.collection,
            created_at: item.created_at,
        })
        .collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(items)
}

/// Overwrites an item's caption. Under the lenient policy an unknown id is
/// a no-op success; under the strict policy it is a not-found error.
#[instrument(skip(store, caption))]
pub async fn update_caption(
    store: &DocStore,
    policy: WritePolicy,
    item_id: &str,
    caption: &str,
) -> Result<(), ItemsError> {
    let found = store
        .update(|doc| match doc.items.get_mut(item_id) {
            Some(item) => {
                item.caption = caption.to_string();
                true
            }
            None => false,
        })
        .await?;

    if found || policy == WritePolicy::Lenient {
        Ok(())
    } else {
        Err(ItemsError::NotFound(item_id.to_string()))
    }
}

/// Deletes an item, its stored files and every vote referencing it, in one
/// document write. File removal is best-effort; a file that is already gone
/// is not an error.
#[instrument(skip(store, storage))]
pub async fn delete_item(
    store: &DocStore,
    storage: &StorageSettings,
    item_id: &str,
) -> Result<(), ItemsError> {
    let removed = store
        .update(|doc| {
            if doc.items.remove(item_id).is_none() {
                return false;
            }
            for votes in doc.lists.values_mut() {
                votes.remove(item_id);
            }
            true
        })
        .await?;
    if !removed {
        return Err(ItemsError::NotFound(item_id.to_string()));
    }

    remove_existing_file(&storage.photo_path(item_id));
    remove_existing_file(&storage.thumbnail_path(item_id));
    Ok(())
}

fn remove_existing_file(path: &Path) {
    if let Err(error) = std::fs::remove_file(path) {
        if error.kind() != ErrorKind::NotFound {
            warn!("Cannot remove {}: {}", path.display(), error);
        }
    }
}
