use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, VelocityRecord};

/// Time of day during which a route or stop is served.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveWindow {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub window: ActiveWindow,
    pub enabled: bool,
    pub color: String,
    pub width: u32,
    pub coords: Vec<Coordinates>,
    #[serde(rename = "duration")]
    pub velocities: Vec<VelocityRecord>,
    /// Measurements that failed and were priced as zero records.
    #[serde(default, rename = "unavailableMeasurements")]
    pub unavailable_measurements: usize,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Everything a caller supplies to create a route.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteDraft {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub window: ActiveWindow,
    pub enabled: bool,
    pub color: String,
    pub width: u32,
    pub coords: Vec<Coordinates>,
}

impl Route {
    /// `coords` replaces the draft's raw coordinates, typically with their
    /// road-snapped counterpart.
    pub fn new(
        draft: RouteDraft,
        coords: Vec<Coordinates>,
        velocities: Vec<VelocityRecord>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            window: draft.window,
            enabled: draft.enabled,
            color: draft.color,
            width: draft.width,
            coords,
            velocities,
            unavailable_measurements: 0,
            created: now,
            updated: now,
        }
    }
}
