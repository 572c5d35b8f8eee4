use crate::database::{DbError, DocumentBackend, FileBackend, MemoryBackend};
use common_types::Document;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handle to the whole-state document, the role `PgPool` plays in a
/// SQL-backed service: cheap to clone, shared by every service call.
///
/// Reads are plain loads. Mutations go through [`DocStore::update`], which
/// serializes the load-mutate-save cycle behind a single writer lock so two
/// in-process writers cannot silently drop each other's changes. Writers in
/// *other* processes are not protected against; last save wins at
/// whole-document granularity.
#[derive(Clone)]
pub struct DocStore {
    backend: Arc<dyn DocumentBackend>,
    write_lock: Arc<Mutex<()>>,
}

impl DocStore {
    #[must_use]
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Store backed by a JSON file on disk.
    #[must_use]
    pub fn file(path: PathBuf) -> Self {
        Self::new(Arc::new(FileBackend::new(path)))
    }

    /// Volatile store for tests and embedding.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::default()))
    }

    /// The full document; an empty default when nothing was stored yet or
    /// when stored documents predate newer top-level keys (serde defaults
    /// fill those in).
    pub async fn load(&self) -> Result<Document, DbError> {
        match self.backend.read()? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Document::default()),
        }
    }

    pub async fn save(&self, document: &Document) -> Result<(), DbError> {
        let raw = serde_json::to_string_pretty(document)?;
        self.backend.write(&raw)
    }

    /// Load-mutate-save under the single writer lock, returning whatever the
    /// mutation closure returns.
    pub async fn update<T>(&self, mutate: impl FnOnce(&mut Document) -> T) -> Result<T, DbError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        let outcome = mutate(&mut document);
        self.save(&document).await?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common_types::Item;
    use tempfile::TempDir;

    #[tokio::test]
    async fn loads_empty_default_when_nothing_stored() -> Result<(), DbError> {
        let store = DocStore::in_memory();

        let document = store.load().await?;

        assert!(document.items.is_empty());
        assert!(document.lists.is_empty());
        assert!(document.collections.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_persists_mutations() -> Result<(), DbError> {
        let store = DocStore::in_memory();

        store
            .update(|doc| {
                doc.items.insert(
                    "p1.jpg".to_string(),
                    Item {
                        id: "p1.jpg".to_string(),
                        caption: "beach".to_string(),
                        collection: None,
                        created_at: Utc::now(),
                    },
                );
            })
            .await?;

        let document = store.load().await?;
        assert_eq!(document.items["p1.jpg"].caption, "beach");
        Ok(())
    }

    #[tokio::test]
    async fn file_store_round_trips_and_defaults_missing_keys() -> Result<(), DbError> {
        let dir = TempDir::new()?;
        let path = dir.path().join("data.json");

        // A document written by an older version without a collections key.
        std::fs::write(&path, r#"{"items": {}, "lists": {"trip": {}}}"#)?;

        let store = DocStore::file(path);
        let document = store.load().await?;
        assert!(document.lists.contains_key("trip"));
        assert!(document.collections.is_empty());

        store
            .update(|doc| {
                doc.lists.entry("house".to_string()).or_default();
            })
            .await?;
        let reloaded = store.load().await?;
        assert_eq!(reloaded.lists.len(), 2);
        Ok(())
    }
}
