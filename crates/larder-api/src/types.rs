// Wire types for the item backend.
//
// Field names follow the backend's camelCase JSON. Dates travel as
// strings; an empty string means "no date".

use serde::{Deserialize, Serialize};

/// One inventory item as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub receive_date: String,
    #[serde(default)]
    pub has_expiration: bool,
    #[serde(default)]
    pub expiration_date: String,
}
