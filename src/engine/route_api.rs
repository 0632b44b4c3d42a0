use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::RouteAPI,
    entities::{Route, RouteDraft},
    error::{invalid_input_error, not_found_error, Error},
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create_route(&self, draft: RouteDraft) -> Result<Route, Error> {
        if draft.coords.is_empty() {
            return Err(invalid_input_error());
        }

        let coords = self.interpolate_or_raw(&draft.coords).await;
        let estimate = self.estimator.estimate(&coords).await?;

        if !estimate.is_complete() {
            tracing::warn!(
                failures = estimate.failures.len(),
                requests = estimate.requests,
                "some segment velocities are unavailable"
            );
        }

        let unavailable = estimate.failures.len();
        let mut route = Route::new(draft, coords, estimate.records);
        route.unavailable_measurements = unavailable;

        self.routes.write().await.push(route.clone());

        tracing::info!(id = %route.id, points = route.coords.len(), "created route");

        Ok(route)
    }

    #[tracing::instrument(skip(self))]
    async fn find_route(&self, id: Uuid) -> Result<Route, Error> {
        self.routes
            .read()
            .await
            .iter()
            .find(|route| route.id == id)
            .cloned()
            .ok_or_else(not_found_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list_routes(&self) -> Result<Vec<Route>, Error> {
        Ok(self.routes.read().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_route(&self, id: Uuid) -> Result<(), Error> {
        let mut routes = self.routes.write().await;

        let index = routes
            .iter()
            .position(|route| route.id == id)
            .ok_or_else(not_found_error)?;
        routes.remove(index);

        tracing::debug!("deleted route");

        Ok(())
    }
}
