use thiserror::Error;

use crate::{
    as_the_crow_flies::as_the_crow_flies_matrices,
    graphhopper_api::{
        GraphHopperError, GraphHopperMatrixClient, GraphHopperMatrixClientParams,
    },
    travel_matrices::{MatrixError, TravelMatrices},
    travel_matrix_provider::TravelMatrixProvider,
};

#[derive(Debug, Error)]
pub enum TravelMatrixError {
    #[error(transparent)]
    GraphHopper(#[from] GraphHopperError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("missing environment variable {0}")]
    MissingApiKey(&'static str),
}

pub const GRAPHHOPPER_API_KEY_VAR: &str = "GRAPHHOPPER_API_KEY";

pub struct TravelMatrixClient {
    graphhopper_client: GraphHopperMatrixClient,
}

impl TravelMatrixClient {
    pub fn from_env() -> Result<Self, TravelMatrixError> {
        let api_key = std::env::var(GRAPHHOPPER_API_KEY_VAR)
            .map_err(|_| TravelMatrixError::MissingApiKey(GRAPHHOPPER_API_KEY_VAR))?;

        Ok(Self::new(api_key))
    }

    pub fn new(api_key: String) -> Self {
        Self {
            graphhopper_client: GraphHopperMatrixClient::new(GraphHopperMatrixClientParams {
                api_key,
            }),
        }
    }

    pub async fn fetch_matrix<P>(
        &self,
        points: &[P],
        provider: &TravelMatrixProvider,
    ) -> Result<TravelMatrices, TravelMatrixError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        match provider {
            TravelMatrixProvider::GraphHopperApi { gh_profile } => Ok(self
                .graphhopper_client
                .fetch_matrix(points, *gh_profile)
                .await?),
            TravelMatrixProvider::AsTheCrowFlies { speed_kmh } => {
                Ok(as_the_crow_flies_matrices(points, *speed_kmh)?)
            }
            TravelMatrixProvider::Custom { matrices } => Ok(matrices.clone()),
        }
    }
}
