use crate::{ApiSettings, BehaviorSettings, LoggingSettings, RawSettings, StorageSettings};
use serde::Deserialize;
use std::path::{Path, PathBuf, absolute};

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub storage: StorageSettings,
    pub behavior: BehaviorSettings,
    pub logging: LoggingSettings,
    pub api: ApiSettings,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        let data_root = absolute(&raw.storage.data_folder).expect("Invalid data_folder");
        let photo_root = absolute(&raw.storage.photo_folder).expect("Invalid photo_folder");
        let thumbnail_root =
            absolute(&raw.storage.thumbnail_folder).expect("Invalid thumbnail_folder");
        let storage = StorageSettings {
            data_folder: data_root,
            photo_folder: photo_root,
            thumbnail_folder: thumbnail_root,
            photo_extensions: raw.storage.photo_extensions,
            thumbnails: raw.storage.thumbnails,
        };

        Self {
            storage,
            behavior: raw.behavior,
            logging: raw.logging,
            api: raw.api,
        }
    }
}

impl StorageSettings {
    // stuff that needs multiple settings (otherwise just make it a standalone function).

    /// Where the whole-state document lives.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.data_folder.join("data.json")
    }

    #[must_use]
    pub fn is_photo_file(&self, file: &Path) -> bool {
        let Some(extension) = file.extension().map(|e| e.to_string_lossy().to_lowercase()) else {
            return false;
        };
        self.photo_extensions.contains(&extension)
    }

    /// Where the source bytes for an item id are stored.
    #[must_use]
    pub fn photo_path(&self, item_id: &str) -> PathBuf {
        self.photo_folder.join(item_id)
    }

    /// Where the derived thumbnail for an item id is stored.
    #[must_use]
    pub fn thumbnail_path(&self, item_id: &str) -> PathBuf {
        self.thumbnail_folder.join(item_id)
    }
}
