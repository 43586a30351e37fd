use thiserror::Error;
use tracing::debug;

use roundtrip_optimizer::{
    algorithm::Algorithm,
    json::{OptimalRouteRequest, OptimalRouteResponse},
    route::{OptimalRoute, RouteError},
};

#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    /// Request-side invariant: `numDests` must equal the matrix row
    /// count and every row must have that many cells.
    #[error("matrix shape mismatch: {rows} rows for {num_dests} destinations")]
    ShapeMismatch { num_dests: usize, rows: usize },

    /// The backend answered 2xx but the permutation is unusable.
    #[error("malformed backend response: {0}")]
    MalformedResponse(#[from] RouteError),
}

/// Client for the route optimizer backend. One POST per submission,
/// no retries; any failure is terminal for the current submission.
pub struct OptimizerClient {
    base_url: String,
    client: reqwest::Client,
}

impl OptimizerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn optimal_route(
        &self,
        algorithm: Algorithm,
        dist_matrix: Vec<Vec<f64>>,
    ) -> Result<OptimalRoute, OptimizerError> {
        let num_dests = dist_matrix.len();
        if let Some(row) = dist_matrix.iter().find(|row| row.len() != num_dests) {
            return Err(OptimizerError::ShapeMismatch {
                num_dests,
                rows: row.len(),
            });
        }

        let request = OptimalRouteRequest {
            num_dests,
            dist_matrix,
            algorithm,
        };

        debug!(%algorithm, num_dests, "requesting optimal route");

        let response = self
            .client
            .post(format!("{}/algo", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(OptimizerError::Backend { status, message });
        }

        let body: OptimalRouteResponse = response.json().await?;

        // advisory only, never verified against the request
        debug!(algorithm_used = %body.algorithm_used, "backend confirmed algorithm");

        Ok(OptimalRoute::new(body.optimal_route, num_dests)?)
    }
}
