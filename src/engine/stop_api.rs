use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::StopAPI,
    entities::{Stop, StopDraft},
    error::{not_found_error, Error},
};

#[async_trait]
impl StopAPI for Engine {
    #[tracing::instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create_stop(&self, draft: StopDraft) -> Result<Stop, Error> {
        let stop = Stop::new(draft);

        self.stops.write().await.push(stop.clone());

        Ok(stop)
    }

    #[tracing::instrument(skip(self))]
    async fn find_stop(&self, id: Uuid) -> Result<Stop, Error> {
        self.stops
            .read()
            .await
            .iter()
            .find(|stop| stop.id == id)
            .cloned()
            .ok_or_else(not_found_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list_stops(&self) -> Result<Vec<Stop>, Error> {
        Ok(self.stops.read().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn list_route_stops(&self, route_id: Uuid) -> Result<Vec<Stop>, Error> {
        Ok(self
            .stops
            .read()
            .await
            .iter()
            .filter(|stop| stop.route_id == route_id)
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_stop(&self, id: Uuid) -> Result<(), Error> {
        let mut stops = self.stops.write().await;

        let index = stops
            .iter()
            .position(|stop| stop.id == id)
            .ok_or_else(not_found_error)?;
        stops.remove(index);

        Ok(())
    }
}
