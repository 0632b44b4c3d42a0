use super::Engine;

use crate::{entities::Coordinates, error::interpolation_unavailable_error};

impl Engine {
    /// Road-snapped version of `raw`, or `raw` itself when the interpolator
    /// has nothing usable to offer.
    #[tracing::instrument(skip_all, fields(points = raw.len()))]
    pub(super) async fn interpolate_or_raw(&self, raw: &[Coordinates]) -> Vec<Coordinates> {
        match self.interpolator.interpolate(raw).await {
            Ok(snapped) if !snapped.is_empty() => {
                tracing::debug!(snapped = snapped.len(), "interpolated path");
                snapped
            }
            Ok(_) => {
                tracing::warn!("interpolation returned no points, using raw coordinates");
                raw.to_vec()
            }
            Err(err) => {
                let err = interpolation_unavailable_error(&err);
                tracing::warn!(code = err.code, "{}, using raw coordinates", err.message);
                raw.to_vec()
            }
        }
    }
}
