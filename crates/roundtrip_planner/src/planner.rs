use std::fmt::Display;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use roundtrip_geocoding::{
    geocode_client::{GeocodeClient, GeocodeError},
    place::Place,
};
use roundtrip_matrix_providers::{
    travel_matrices::TravelMatrices,
    travel_matrix_client::{TravelMatrixClient, TravelMatrixError},
    travel_matrix_provider::TravelMatrixProvider,
};
use roundtrip_optimizer::{algorithm::Algorithm, route::OptimalRoute};

use crate::{
    destination_form::{DestinationForm, Itinerary},
    error::PlanError,
    optimizer_client::{OptimizerClient, OptimizerError},
    trip_plan::TripPlan,
};

/// Which matrix the solver minimizes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMetric {
    Distance,
    Duration,
}

impl Display for CostMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CostMetric::Distance => "distance",
                CostMetric::Duration => "duration",
            }
        )
    }
}

impl FromStr for CostMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "distance" => Ok(CostMetric::Distance),
            "duration" => Ok(CostMetric::Duration),
            other => Err(format!("unknown metric {other:?}, expected \"distance\" or \"duration\"")),
        }
    }
}

/// Where the pipeline currently is. Purely observational; transitions
/// are strictly sequential and every exit path returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerStage {
    Idle,
    Geocoding,
    MatrixBuilding,
    RouteOptimizing,
    Rendering,
}

/// Fixed-window submit guard. The original front end hid the submit
/// button for two seconds after each click; this is the same
/// mitigation, not cancellation of in-flight work.
#[derive(Debug)]
pub struct Cooldown {
    window: Duration,
    last_submit: Option<Instant>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_submit: None,
        }
    }

    pub fn try_begin(&mut self) -> bool {
        let now = Instant::now();
        match self.last_submit {
            Some(last) if now.duration_since(last) < self.window => false,
            _ => {
                self.last_submit = Some(now);
                true
            }
        }
    }
}

pub const DEFAULT_SUBMIT_COOLDOWN: Duration = Duration::from_secs(2);

#[allow(async_fn_in_trait)]
pub trait GeocodePlaces {
    async fn geocode(&self, query: &str) -> Result<Place, GeocodeError>;
}

#[allow(async_fn_in_trait)]
pub trait ProvideTravelMatrices {
    async fn fetch_matrix(&self, points: &[Place]) -> Result<TravelMatrices, TravelMatrixError>;
}

#[allow(async_fn_in_trait)]
pub trait SolveOptimalRoute {
    async fn optimal_route(
        &self,
        algorithm: Algorithm,
        matrix: Vec<Vec<f64>>,
    ) -> Result<OptimalRoute, OptimizerError>;
}

impl GeocodePlaces for GeocodeClient {
    async fn geocode(&self, query: &str) -> Result<Place, GeocodeError> {
        GeocodeClient::geocode(self, query).await
    }
}

/// A matrix client bound to one provider choice.
pub struct ConfiguredMatrixClient {
    pub client: TravelMatrixClient,
    pub provider: TravelMatrixProvider,
}

impl ProvideTravelMatrices for ConfiguredMatrixClient {
    async fn fetch_matrix(&self, points: &[Place]) -> Result<TravelMatrices, TravelMatrixError> {
        self.client.fetch_matrix(points, &self.provider).await
    }
}

impl SolveOptimalRoute for OptimizerClient {
    async fn optimal_route(
        &self,
        algorithm: Algorithm,
        matrix: Vec<Vec<f64>>,
    ) -> Result<OptimalRoute, OptimizerError> {
        OptimizerClient::optimal_route(self, algorithm, matrix).await
    }
}

/// Orchestrates one submission end to end: geocode every stop in
/// order, build the travel matrices for the unique stops, ask the
/// backend for the visiting order, render the plan. Each await point
/// is sequential; nothing fans out.
pub struct TripPlanner<G, M, O> {
    geocoder: G,
    matrices: M,
    optimizer: O,
    stage: PlannerStage,
    cooldown: Cooldown,
    current_plan: Option<TripPlan>,
}

impl<G, M, O> TripPlanner<G, M, O>
where
    G: GeocodePlaces,
    M: ProvideTravelMatrices,
    O: SolveOptimalRoute,
{
    pub fn new(geocoder: G, matrices: M, optimizer: O) -> Self {
        Self {
            geocoder,
            matrices,
            optimizer,
            stage: PlannerStage::Idle,
            cooldown: Cooldown::new(DEFAULT_SUBMIT_COOLDOWN),
            current_plan: None,
        }
    }

    pub fn with_cooldown(mut self, window: Duration) -> Self {
        self.cooldown = Cooldown::new(window);
        self
    }

    pub fn stage(&self) -> PlannerStage {
        self.stage
    }

    /// The last successfully rendered plan, if any. Cleared whenever a
    /// submission fails past validation.
    pub fn current_plan(&self) -> Option<&TripPlan> {
        self.current_plan.as_ref()
    }

    pub async fn submit(
        &mut self,
        form: &DestinationForm,
        metric: CostMetric,
        algorithm: Algorithm,
    ) -> Result<TripPlan, PlanError> {
        if !self.cooldown.try_begin() {
            return Err(PlanError::CoolingDown);
        }

        // validation happens before any network activity, but a
        // rejected submission still clears the drawn route
        let itinerary = match form.submit() {
            Ok(itinerary) => itinerary,
            Err(error) => {
                self.current_plan = None;
                return Err(error.into());
            }
        };

        let result = self.run_pipeline(&itinerary, metric, algorithm).await;
        self.stage = PlannerStage::Idle;

        match result {
            Ok(plan) => {
                self.current_plan = Some(plan.clone());
                Ok(plan)
            }
            Err(error) => {
                // a failed submission never leaves a stale route drawn
                self.current_plan = None;
                Err(error)
            }
        }
    }

    async fn run_pipeline(
        &mut self,
        itinerary: &Itinerary,
        metric: CostMetric,
        algorithm: Algorithm,
    ) -> Result<TripPlan, PlanError> {
        self.stage = PlannerStage::Geocoding;
        let mut places = Vec::with_capacity(itinerary.stops().len());
        for stop in itinerary.stops() {
            // one stop at a time, in itinerary order
            places.push(self.geocoder.geocode(stop).await?);
        }

        self.stage = PlannerStage::MatrixBuilding;
        // the trailing stop duplicates the origin; matrices cover the
        // unique stops only
        let unique = &places[..places.len() - 1];
        let matrices = self.matrices.fetch_matrix(unique).await?;

        self.stage = PlannerStage::RouteOptimizing;
        let rows = match metric {
            CostMetric::Distance => matrices.distance_rows(),
            CostMetric::Duration => matrices.duration_rows(),
        };
        let route = self.optimizer.optimal_route(algorithm, rows).await?;

        self.stage = PlannerStage::Rendering;
        let plan = TripPlan::render(unique, &matrices, &route);

        info!(
            stops = unique.len(),
            %metric,
            %algorithm,
            total_distance_meters = plan.total_distance_meters,
            "trip planned"
        );

        Ok(plan)
    }
}
