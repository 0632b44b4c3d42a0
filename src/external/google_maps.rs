use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::{
    api::{DistanceMatrix, RoadInterpolator},
    config::Config,
    entities::{Coordinates, DistanceMeasurement},
    error::{decode_error, invalid_input_error, upstream_error, Error},
};

/// Upper bound on snapped points per input point. Anything longer is treated
/// as a malformed response.
pub const MAX_INTERPOLATION_FACTOR: usize = 50;

const PATH_PRECISION: usize = 10;
const MATRIX_PRECISION: usize = 6;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapResponse {
    #[serde(default)]
    snapped_points: Vec<SnappedPoint>,
}

#[derive(Clone, Debug, Deserialize)]
struct SnappedPoint {
    location: LatLng,
}

#[derive(Clone, Debug, Deserialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Clone, Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Clone, Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Clone, Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<MatrixValue>,
    duration: Option<MatrixValue>,
}

#[derive(Clone, Debug, Deserialize)]
struct MatrixValue {
    value: f64,
}

/// Client for the Roads and Distance Matrix APIs. The API key is only read.
#[derive(Clone)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_key: String,
    maps_api_url: String,
    roads_api_url: String,
}

impl std::fmt::Debug for GoogleMaps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMaps")
            .field("maps_api_url", &self.maps_api_url)
            .field("roads_api_url", &self.roads_api_url)
            .finish()
    }
}

impl GoogleMaps {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            maps_api_url: config.maps_api_url.trim_end_matches('/').into(),
            roads_api_url: config.roads_api_url.trim_end_matches('/').into(),
        })
    }
}

#[async_trait]
impl RoadInterpolator for GoogleMaps {
    #[tracing::instrument(skip(self, coords), fields(points = coords.len()))]
    async fn interpolate(&self, coords: &[Coordinates]) -> Result<Vec<Coordinates>, Error> {
        if coords.is_empty() {
            return Err(invalid_input_error());
        }

        let url = format!("{}/v1/snapToRoads", self.roads_api_url);
        tracing::debug!("requesting {}", url);

        let res = self
            .client
            .get(url)
            .query(&[("path", snap_path(coords))])
            .query(&[("interpolate", "true")])
            .query(&[("key", &self.api_key)])
            .send()
            .await?;

        let data: SnapResponse = check_status(res)?.json().await?;

        snapped_coordinates(data, coords.len())
    }
}

#[async_trait]
impl DistanceMatrix for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn measure(
        &self,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<DistanceMeasurement, Error> {
        let url = format!("{}/maps/api/distancematrix/json", self.maps_api_url);
        tracing::debug!("requesting {}", url);

        let res = self
            .client
            .get(url)
            .query(&[("units", "imperial")])
            .query(&[("origins", from.to_query(MATRIX_PRECISION))])
            .query(&[("destinations", to.to_query(MATRIX_PRECISION))])
            .query(&[("key", &self.api_key)])
            .send()
            .await?;

        let data: MatrixResponse = check_status(res)?.json().await?;

        measurement(data, from, to)
    }
}

/// Pipe separated `lat,lng` pairs, in input order.
pub fn snap_path(coords: &[Coordinates]) -> String {
    coords
        .iter()
        .map(|c| c.to_query(PATH_PRECISION))
        .collect::<Vec<_>>()
        .join("|")
}

fn check_status(res: Response) -> Result<Response, Error> {
    let status = res.status();

    if status.is_client_error() {
        tracing::warn!(%status, "request rejected");
        return Err(invalid_input_error());
    } else if status != StatusCode::OK {
        tracing::warn!(%status, "unexpected response status");
        return Err(upstream_error());
    }

    Ok(res)
}

fn snapped_coordinates(data: SnapResponse, input_len: usize) -> Result<Vec<Coordinates>, Error> {
    let limit = input_len.max(1) * MAX_INTERPOLATION_FACTOR;

    if data.snapped_points.len() > limit {
        return Err(decode_error(format!(
            "{} snapped points for {} input points",
            data.snapped_points.len(),
            input_len
        )));
    }

    Ok(data
        .snapped_points
        .into_iter()
        .map(|point| Coordinates::new(point.location.latitude, point.location.longitude))
        .collect())
}

fn measurement(
    data: MatrixResponse,
    from: Coordinates,
    to: Coordinates,
) -> Result<DistanceMeasurement, Error> {
    if data.status != DistanceMeasurement::OK {
        tracing::warn!(status = %data.status, "distance matrix request not ok");
        return Err(upstream_error());
    }

    let element = data
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
        .ok_or_else(|| decode_error("missing rows[0].elements[0]"))?;

    if element.status != DistanceMeasurement::OK {
        return Ok(DistanceMeasurement {
            status: element.status,
            ..DistanceMeasurement::zero(from, to)
        });
    }

    match (element.distance, element.duration) {
        (Some(distance), Some(duration)) => Ok(DistanceMeasurement {
            origin: from,
            destination: to,
            distance: distance.value,
            duration: duration.value,
            status: element.status,
        }),
        _ => Err(decode_error("element without distance or duration")),
    }
}
