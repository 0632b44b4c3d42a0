use geo_types::Coord;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lng", alias = "longitude")]
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Euclidean distance treating latitude/longitude as planar cartesian
    /// coordinates. An approximation only: no geodesic correction.
    pub fn planar_distance(&self, other: &Coordinates) -> f64 {
        let delta = Coord::from(*self) - Coord::from(*other);
        delta.x.hypot(delta.y)
    }

    /// `"{lat},{lng}"` with a fixed number of decimal digits.
    pub fn to_query(&self, precision: usize) -> String {
        format!(
            "{:.*},{:.*}",
            precision, self.latitude, precision, self.longitude
        )
    }
}

impl From<Coordinates> for Coord<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Coord {
            x: coordinates.longitude,
            y: coordinates.latitude,
        }
    }
}
