use chrono::{DateTime, Utc};
use common_types::VoteChoice;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// One item joined with its vote inside the queried list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListViewItem {
    pub id: String,
    pub caption: String,
    /// Derived thumbnail reference; `None` when the derivative could not be
    /// (re)generated.
    pub thumbnail: Option<String>,
    pub choice: VoteChoice,
    pub comment: String,
    pub voted_at: DateTime<Utc>,
    pub collection: Option<String>,
    /// Names of the other lists that also marked this item as wanted,
    /// ascending. Always empty for non-want votes.
    pub also_wanted_in: Vec<String>,
}

/// The aggregated view: collection name -> joined records, bucketed under
/// "Uncategorized" when an item has no collection.
pub type ListView = BTreeMap<String, Vec<ListViewItem>>;
