use crate::{Item, Vote};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Grouping bucket for items without a collection.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Votes within one list, keyed by item id.
pub type VoteMap = BTreeMap<String, Vote>;

/// Registry entry for an explicitly created collection. Collections carry no
/// attributes beyond their name, so this stays empty on disk (`{}`).
#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
pub struct CollectionEntry {}

/// The whole persisted state: one document, rewritten wholesale on every
/// mutation. Every field defaults so documents written by older versions
/// (or an absent file) load cleanly.
///
/// `BTreeMap` keeps iteration, serialization and aggregation output
/// deterministic.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Document {
    /// Item id -> item.
    #[serde(default)]
    pub items: BTreeMap<String, Item>,
    /// List name -> (item id -> vote). The list name is the primary key.
    #[serde(default)]
    pub lists: BTreeMap<String, VoteMap>,
    /// Explicitly registered collection names.
    #[serde(default)]
    pub collections: BTreeMap<String, CollectionEntry>,
}
