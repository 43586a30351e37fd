use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;

/// Body of `POST /algo`. Field names are part of the wire contract.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OptimalRouteRequest {
    #[serde(rename = "numDests")]
    pub num_dests: usize,

    /// Square cost matrix, `numDests` rows of `numDests` cells
    #[serde(rename = "distMatrix")]
    pub dist_matrix: Vec<Vec<f64>>,

    pub algorithm: Algorithm,
}

/// Response of `POST /algo`. `algorithm_used` confirms which solver
/// ran; it is advisory and never verified by clients.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OptimalRouteResponse {
    pub optimal_route: Vec<usize>,
    pub algorithm_used: String,
}
