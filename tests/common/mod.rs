use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use vectura::api::{DistanceMatrix, RoadInterpolator};
use vectura::engine::Engine;
use vectura::entities::{Coordinates, DistanceMeasurement, RouteDraft};
use vectura::error::{upstream_error, Error};
use vectura::estimator::VelocityEstimator;

/// Roads double: inserts a midpoint between every pair of input points, or
/// fails / answers nothing when told to.
pub enum Roads {
    Midpoints,
    Empty,
    Down,
}

#[async_trait]
impl RoadInterpolator for Roads {
    async fn interpolate(&self, coords: &[Coordinates]) -> Result<Vec<Coordinates>, Error> {
        match self {
            Roads::Midpoints => {
                let mut snapped = vec![coords[0]];
                for pair in coords.windows(2) {
                    snapped.push(Coordinates::new(
                        (pair[0].latitude + pair[1].latitude) / 2.0,
                        (pair[0].longitude + pair[1].longitude) / 2.0,
                    ));
                    snapped.push(pair[1]);
                }
                Ok(snapped)
            }
            Roads::Empty => Ok(Vec::new()),
            Roads::Down => Err(upstream_error()),
        }
    }
}

/// Matrix double: 1000 distance units and 60 duration units per planar degree.
/// Requests starting at `fail_from` fail.
#[derive(Default)]
pub struct Planar {
    pub calls: Mutex<usize>,
    pub fail_from: Option<Coordinates>,
}

impl Planar {
    pub fn failing_from(origin: Coordinates) -> Self {
        Self {
            fail_from: Some(origin),
            ..Default::default()
        }
    }
}

#[async_trait]
impl DistanceMatrix for Planar {
    async fn measure(&self, from: Coordinates, to: Coordinates) -> Result<DistanceMeasurement, Error> {
        *self.calls.lock().unwrap() += 1;

        if self.fail_from == Some(from) {
            return Err(upstream_error());
        }

        let degrees = from.planar_distance(&to);
        Ok(DistanceMeasurement {
            origin: from,
            destination: to,
            distance: degrees * 1000.0,
            duration: degrees * 60.0,
            status: DistanceMeasurement::OK.into(),
        })
    }
}

pub fn engine(roads: Roads, matrix: Arc<Planar>, threshold: usize) -> Engine {
    let estimator = VelocityEstimator::new(matrix, threshold).unwrap();
    Engine::new(Arc::new(roads), estimator)
}

pub fn draft(coords: Vec<Coordinates>) -> RouteDraft {
    RouteDraft {
        name: "West Route".into(),
        description: "Union to Blitman".into(),
        enabled: true,
        color: "#96C03A".into(),
        width: 4,
        coords,
        ..Default::default()
    }
}

pub fn waypoints() -> Vec<Coordinates> {
    vec![
        Coordinates::new(0.0, 0.0),
        Coordinates::new(0.0, 2.0),
        Coordinates::new(2.0, 2.0),
    ]
}
