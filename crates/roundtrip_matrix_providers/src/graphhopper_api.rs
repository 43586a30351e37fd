use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::travel_matrices::{MatrixError, TravelMatrices};

pub type GHPoint = [f64; 2];

#[derive(Debug, Deserialize, Serialize, JsonSchema, Copy, Clone, Hash, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GraphHopperProfile {
    Car,
    Bike,
    Foot,
}

impl Display for GraphHopperProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GraphHopperProfile::Car => "car",
                GraphHopperProfile::Bike => "bike",
                GraphHopperProfile::Foot => "foot",
            }
        )
    }
}

#[derive(Debug, Error)]
pub enum GraphHopperError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixRequestBody {
    /// Points for a symmetric all-to-all matrix, [lon, lat]
    pub points: Vec<GHPoint>,

    /// Which arrays to return: "times", "distances"
    pub out_arrays: Vec<String>,

    /// Routing profile (e.g., "car", "bike", "foot")
    pub profile: String,

    /// Keep unresolvable cells as nulls instead of failing the call
    pub fail_fast: bool,
}

#[derive(Deserialize)]
struct MatrixResponseBody {
    /// Travel times in seconds, null when a cell could not be resolved
    times: Vec<Vec<Option<f64>>>,

    /// Distances in meters, null when a cell could not be resolved
    distances: Vec<Vec<Option<f64>>>,
}

pub struct GraphHopperMatrixClientParams {
    pub api_key: String,
}

pub const GRAPHOPPER_MATRIX_API_URL: &str = "https://graphhopper.com/api/1/matrix";

pub struct GraphHopperMatrixClient {
    params: GraphHopperMatrixClientParams,
    client: reqwest::Client,
}

impl GraphHopperMatrixClient {
    pub fn new(params: GraphHopperMatrixClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    /// Fetches the all-to-all distance and duration matrices for the
    /// given points in one synchronous matrix call. Instances here are
    /// small (at most ten points), well under the sync endpoint limit.
    pub async fn fetch_matrix<P>(
        &self,
        points: &[P],
        profile: GraphHopperProfile,
    ) -> Result<TravelMatrices, GraphHopperError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let gh_points: Vec<GHPoint> = points
            .iter()
            .map(|p| {
                let point: geo_types::Point = p.into();
                [point.x(), point.y()]
            })
            .collect();

        let body = MatrixRequestBody {
            points: gh_points,
            out_arrays: vec!["times".to_string(), "distances".to_string()],
            profile: profile.to_string(),
            fail_fast: false,
        };

        let response = self
            .client
            .post(GRAPHOPPER_MATRIX_API_URL)
            .query(&[("key", &self.params.api_key)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(GraphHopperError::RateLimited);
            }

            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GraphHopperError::Api { status, message });
        }

        debug!(points = points.len(), %profile, "GraphHopperApi: received matrix response");

        let body: MatrixResponseBody = response.json().await?;

        Ok(parse_matrices(points.len(), body)?)
    }
}

fn parse_matrices(size: usize, body: MatrixResponseBody) -> Result<TravelMatrices, MatrixError> {
    let cells = body
        .distances
        .into_iter()
        .flatten()
        .zip(body.times.into_iter().flatten())
        .collect::<Vec<_>>();

    TravelMatrices::from_cells(size, cells)
}
