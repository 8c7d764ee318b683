use serde::{Deserialize, Serialize};

use crate::models::item_id::ItemId;

/// Payload of the outbound toggle request.
#[derive(Serialize, Debug, Clone)]
pub struct TogglePayload<'a> {
    pub post_id: &'a ItemId,
}

/// Authoritative state returned by the server after a toggle.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleResponse {
    pub liked: bool,
    pub count: u64,
}

impl ToggleResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
