use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

/// Estimated distance and travel duration to go from `start` to `end`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VelocityRecord {
    #[serde(rename = "origin")]
    pub start: Coordinates,
    #[serde(rename = "destination")]
    pub end: Coordinates,
    pub distance: f64,
    pub duration: f64,
}

impl VelocityRecord {
    pub fn new(start: Coordinates, end: Coordinates, distance: f64, duration: f64) -> Self {
        Self {
            start,
            end,
            distance,
            duration,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceMeasurement {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub distance: f64,
    pub duration: f64,
    pub status: String,
}

impl DistanceMeasurement {
    pub const OK: &'static str = "OK";
    pub const UNAVAILABLE: &'static str = "UNAVAILABLE";

    /// Stand-in used when the measurement could not be obtained.
    pub fn zero(origin: Coordinates, destination: Coordinates) -> Self {
        Self {
            origin,
            destination,
            distance: 0.0,
            duration: 0.0,
            status: Self::UNAVAILABLE.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Self::OK
    }
}
