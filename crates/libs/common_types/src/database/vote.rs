use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A voter's decision on one item within one list.
///
/// `want` is the only choice with aggregation semantics: it is what the
/// cross-list "also wanted in" annotation is computed from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Want,
    Pass,
}

/// One voter's choice + comment for one item within one list.
/// At most one vote exists per (list, item); a later vote overwrites.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub choice: VoteChoice,
    #[serde(default)]
    pub comment: String,
    pub voted_at: DateTime<Utc>,
}
