mod helpers;
mod route_api;
mod stop_api;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    api::{DynRoadInterpolator, API},
    config::Config,
    entities::{Route, Stop},
    error::Error,
    estimator::VelocityEstimator,
    external::GoogleMaps,
};

/// Keeps routes and stops in memory and prices every new route through the
/// interpolation and velocity estimation pipeline.
pub struct Engine {
    interpolator: DynRoadInterpolator,
    estimator: VelocityEstimator,
    routes: RwLock<Vec<Route>>,
    stops: RwLock<Vec<Stop>>,
}

impl Engine {
    pub fn new(interpolator: DynRoadInterpolator, estimator: VelocityEstimator) -> Self {
        Self {
            interpolator,
            estimator,
            routes: RwLock::new(Vec::new()),
            stops: RwLock::new(Vec::new()),
        }
    }

    /// One Google Maps client serves as both interpolator and distance matrix.
    #[tracing::instrument(name = "Engine::from_config", skip_all)]
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        config.validate()?;

        let google_maps = Arc::new(GoogleMaps::new(config)?);
        let estimator = VelocityEstimator::from_config(google_maps.clone(), config)?;

        Ok(Self::new(google_maps, estimator))
    }

    pub fn estimator(&self) -> &VelocityEstimator {
        &self.estimator
    }
}

impl API for Engine {}
