use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One file from a bulk upload, already parsed out of the transport layer.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

// --- Request Payloads ---

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaptionRequest {
    pub caption: String,
}

// --- Response Payloads ---

/// Outcome of a bulk upload: the ids that were created and how many of the
/// posted files made it.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BulkUploadResponse {
    pub saved_count: usize,
    pub ids: Vec<String>,
}

/// An item plus its derived thumbnail reference.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub id: String,
    pub caption: String,
    pub collection: Option<String>,
    pub created_at: DateTime<Utc>,
    pub thumbnail: String,
}
