use thiserror::Error;

use roundtrip_geocoding::geocode_client::GeocodeError;
use roundtrip_matrix_providers::{
    graphhopper_api::GraphHopperError,
    travel_matrices::MatrixError,
    travel_matrix_client::TravelMatrixError,
};

use crate::{destination_form::ValidationError, optimizer_client::OptimizerError};

/// How a message should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Info,
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("matrix request failed: {0}")]
    Matrix(#[from] TravelMatrixError),

    #[error("route optimization failed: {0}")]
    Optimizer(#[from] OptimizerError),

    /// A submission arrived inside the cooldown window of the previous
    /// one.
    #[error("a submission is already in progress, try again shortly")]
    CoolingDown,
}

impl PlanError {
    /// The user-facing message for the shared message area. Wording
    /// follows the original front end.
    pub fn user_message(&self) -> String {
        match self {
            PlanError::Validation(_) => {
                "ERROR: A route requires an origin and at least one destination. Please try again."
                    .to_string()
            }
            PlanError::Geocode(GeocodeError::RateLimited)
            | PlanError::Matrix(TravelMatrixError::GraphHopper(GraphHopperError::RateLimited)) => {
                "ERROR: You have requested too many queries in too short of a time. Please wait at least 30 seconds before trying again."
                    .to_string()
            }
            PlanError::Geocode(GeocodeError::NoResults(_)) => {
                "ERROR: A destination was entered that is not valid. Try again.".to_string()
            }
            PlanError::Matrix(TravelMatrixError::GraphHopper(GraphHopperError::Matrix(
                MatrixError::Unreachable { .. },
            )))
            | PlanError::Matrix(TravelMatrixError::Matrix(MatrixError::Unreachable { .. })) => {
                "ERROR: A destination was entered that is not connected to the origin by land. Try again."
                    .to_string()
            }
            PlanError::CoolingDown => {
                "Please wait a moment before submitting another route.".to_string()
            }
            _ => {
                "ERROR: Request failed for an unknown reason. Please wait some time and try again."
                    .to_string()
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            PlanError::CoolingDown => Severity::Info,
            _ => Severity::Error,
        }
    }
}
