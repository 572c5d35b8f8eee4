use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One uploaded photo. The id doubles as the stored file name
/// (`<random>.<ext>`), so the source file and its thumbnail are both
/// addressable from the id alone.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub caption: String,
    /// Grouping key; `None` items land in the "Uncategorized" bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    pub created_at: DateTime<Utc>,
}
