use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::place::Place;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// HTTP 429 from the provider
    #[error("rate limit exceeded")]
    RateLimited,

    /// The provider resolved the query to an empty hit list
    #[error("no results for query {0:?}")]
    NoResults(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("empty geocoding query")]
    EmptyQuery,
}

#[derive(Deserialize)]
struct GeocodeResponseBody {
    hits: Vec<GeocodeHit>,
}

#[derive(Deserialize)]
struct GeocodeHit {
    point: GeocodePoint,
    name: String,
}

#[derive(Deserialize)]
struct GeocodePoint {
    lat: f64,
    lng: f64,
}

pub struct GeocodeClientParams {
    pub api_key: String,
}

pub const GRAPHOPPER_GEOCODE_API_URL: &str = "https://graphhopper.com/api/1/geocode";

pub const GRAPHHOPPER_API_KEY_VAR: &str = "GRAPHHOPPER_API_KEY";

/// Forward-geocoding client. One request per query, first hit wins;
/// the provider orders hits by relevance.
pub struct GeocodeClient {
    params: GeocodeClientParams,
    client: reqwest::Client,
}

impl GeocodeClient {
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var(GRAPHHOPPER_API_KEY_VAR)?;
        Ok(Self::new(GeocodeClientParams { api_key }))
    }

    pub fn new(params: GeocodeClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub async fn geocode(&self, query: &str) -> Result<Place, GeocodeError> {
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let response = self
            .client
            .get(GRAPHOPPER_GEOCODE_API_URL)
            .query(&[("q", query), ("limit", "1"), ("key", &self.params.api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(GeocodeError::RateLimited);
            }

            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api { status, message });
        }

        let body: GeocodeResponseBody = response.json().await?;

        let hit = body
            .hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoResults(query.to_string()))?;

        debug!(query, name = %hit.name, lat = hit.point.lat, lon = hit.point.lng, "geocoded");

        Ok(Place {
            query: query.to_string(),
            name: hit.name,
            point: geo_types::Point::new(hit.point.lng, hit.point.lat),
        })
    }
}
