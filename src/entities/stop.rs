use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{ActiveWindow, Coordinates};

/// A place where a tracked vehicle is scheduled to arrive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location: Coordinates,
    pub address: String,
    #[serde(flatten)]
    pub window: ActiveWindow,
    pub enabled: bool,
    pub route_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDraft {
    pub name: String,
    pub description: String,
    pub location: Coordinates,
    pub address: String,
    #[serde(flatten)]
    pub window: ActiveWindow,
    pub enabled: bool,
    pub route_id: Uuid,
}

impl Stop {
    pub fn new(draft: StopDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            location: draft.location,
            address: draft.address,
            window: draft.window,
            enabled: draft.enabled,
            route_id: draft.route_id,
        }
    }
}
