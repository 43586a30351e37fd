use serde::{Deserialize, Serialize};

use crate::{graphhopper_api::GraphHopperProfile, travel_matrices::TravelMatrices};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub enum TravelMatrixProvider {
    /// https://docs.graphhopper.com/#tag/Matrix-API
    GraphHopperApi { gh_profile: GraphHopperProfile },

    AsTheCrowFlies { speed_kmh: f64 },

    Custom { matrices: TravelMatrices },
}
