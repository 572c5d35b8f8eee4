use common_types::WritePolicy;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    /// Folders for the document file, source photos and thumbnails.
    pub storage: StorageSettings,
    pub behavior: BehaviorSettings,
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub constants: RawConstants,
}

/// Defines paths for the data document, photo and thumbnail storage.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub data_folder: PathBuf,
    pub photo_folder: PathBuf,
    pub thumbnail_folder: PathBuf,
    /// Which extensions are accepted as photo uploads.
    pub photo_extensions: Vec<String>,
    pub thumbnails: ThumbnailSettings,
}

/// Configuration for thumbnail generation.
#[derive(Debug, Deserialize, Clone)]
pub struct ThumbnailSettings {
    /// Neither thumbnail dimension will exceed this. Sources smaller than the
    /// bound are re-encoded at their original size, never upscaled.
    pub max_dimension: u32,
}

/// How write-side references to unknown entities are treated.
#[derive(Debug, Deserialize, Clone)]
pub struct BehaviorSettings {
    pub write_policy: WritePolicy,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
    pub public_url: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawConstants {
    pub database: DatabaseConstants,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConstants {
    /// Length of generated item ids, excluding the file extension.
    pub item_id_length: usize,
}
