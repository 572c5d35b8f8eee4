use common_types::VoteChoice;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Request Payloads ---

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RecordVoteRequest {
    /// The item being voted on.
    pub item: String,
    pub choice: VoteChoice,
    #[serde(default)]
    pub comment: String,
}
