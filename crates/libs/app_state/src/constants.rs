use crate::{DatabaseConstants, RawSettings};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConstants {
    pub database: DatabaseConstants,
}

impl From<RawSettings> for AppConstants {
    fn from(raw: RawSettings) -> Self {
        Self {
            database: raw.constants.database,
        }
    }
}

impl Default for AppConstants {
    fn default() -> Self {
        Self {
            database: DatabaseConstants { item_id_length: 12 },
        }
    }
}
