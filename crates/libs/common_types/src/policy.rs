use serde::{Deserialize, Serialize};

/// How writes referencing unknown entities are treated.
///
/// The original behavior is lenient: a vote for an unknown list is dropped
/// without an error and a caption update for an unknown item is a no-op.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WritePolicy {
    #[default]
    Lenient,
    Strict,
}
