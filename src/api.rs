use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{Coordinates, DistanceMeasurement, Route, RouteDraft, Stop, StopDraft};
use crate::error::{interpolation_unavailable_error, measurement_unavailable_error, Error};

/// Snaps a raw coordinate sequence onto the road network, filling in the
/// points in between.
#[async_trait]
pub trait RoadInterpolator {
    async fn interpolate(&self, coords: &[Coordinates]) -> Result<Vec<Coordinates>, Error>;

    /// Failures collapse to an empty sequence. Callers must treat an empty
    /// result as "no usable interpolation".
    async fn interpolate_or_empty(&self, coords: &[Coordinates]) -> Vec<Coordinates> {
        match self.interpolate(coords).await {
            Ok(snapped) => snapped,
            Err(err) => {
                let err = interpolation_unavailable_error(&err);
                tracing::warn!(code = err.code, "{}", err.message);
                Vec::new()
            }
        }
    }
}

/// Measures the travel distance and duration between two points.
#[async_trait]
pub trait DistanceMatrix {
    async fn measure(
        &self,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<DistanceMeasurement, Error>;

    /// Failures collapse to a zero-valued measurement.
    async fn measure_or_zero(&self, from: Coordinates, to: Coordinates) -> DistanceMeasurement {
        match self.measure(from, to).await {
            Ok(measurement) => measurement,
            Err(err) => {
                let err = measurement_unavailable_error(&err);
                tracing::warn!(code = err.code, "{}", err.message);
                DistanceMeasurement::zero(from, to)
            }
        }
    }
}

pub type DynRoadInterpolator = Arc<dyn RoadInterpolator + Send + Sync>;
pub type DynDistanceMatrix = Arc<dyn DistanceMatrix + Send + Sync>;

#[async_trait]
pub trait RouteAPI {
    async fn create_route(&self, draft: RouteDraft) -> Result<Route, Error>;
    async fn find_route(&self, id: Uuid) -> Result<Route, Error>;
    async fn list_routes(&self) -> Result<Vec<Route>, Error>;
    async fn delete_route(&self, id: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait StopAPI {
    async fn create_stop(&self, draft: StopDraft) -> Result<Stop, Error>;
    async fn find_stop(&self, id: Uuid) -> Result<Stop, Error>;
    async fn list_stops(&self) -> Result<Vec<Stop>, Error>;
    async fn list_route_stops(&self, route_id: Uuid) -> Result<Vec<Stop>, Error>;
    async fn delete_stop(&self, id: Uuid) -> Result<(), Error>;
}

pub trait API: RouteAPI + StopAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
