use anyhow::Context;
use clap::ValueEnum;
use comfy_table::Table;
use tracing::warn;

use roundtrip_geocoding::geocode_client::GeocodeClient;
use roundtrip_matrix_providers::{
    graphhopper_api::GraphHopperProfile,
    travel_matrix_client::{GRAPHHOPPER_API_KEY_VAR, TravelMatrixClient},
    travel_matrix_provider::TravelMatrixProvider,
};
use roundtrip_optimizer::algorithm::Algorithm;
use roundtrip_planner::{
    destination_form::DestinationForm,
    optimizer_client::OptimizerClient,
    planner::{ConfiguredMatrixClient, CostMetric, TripPlanner},
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProviderArg {
    /// GraphHopper matrix API (needs GRAPHHOPPER_API_KEY)
    Graphhopper,
    /// Straight-line distances at a fixed speed, no matrix provider
    CrowFly,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProfileArg {
    Car,
    Bike,
    Foot,
}

impl From<ProfileArg> for GraphHopperProfile {
    fn from(profile: ProfileArg) -> Self {
        match profile {
            ProfileArg::Car => GraphHopperProfile::Car,
            ProfileArg::Bike => GraphHopperProfile::Bike,
            ProfileArg::Foot => GraphHopperProfile::Foot,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct PlanArgs {
    /// Starting (and final) location of the round trip
    #[arg(short, long)]
    pub origin: String,

    /// Destination to visit; repeat for more, at most nine
    #[arg(short, long = "dest", value_name = "PLACE", required = true)]
    pub destinations: Vec<String>,

    /// Minimize travel distance or travel duration
    #[arg(short, long, default_value = "distance")]
    pub metric: CostMetric,

    /// TSP algorithm the backend should run
    #[arg(short, long, default_value = "MST")]
    pub algorithm: Algorithm,

    /// Base URL of the route optimizer backend
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    pub backend_url: String,

    #[arg(long, value_enum, default_value_t = ProviderArg::Graphhopper)]
    pub provider: ProviderArg,

    #[arg(long, value_enum, default_value_t = ProfileArg::Car)]
    pub profile: ProfileArg,

    /// Assumed speed for the crow-fly provider
    #[arg(long, default_value_t = 60.0)]
    pub speed_kmh: f64,
}

pub async fn run(args: PlanArgs) -> Result<(), anyhow::Error> {
    let mut form = DestinationForm::new();
    form.set_origin(&args.origin);
    for destination in &args.destinations {
        if !form.push_destination(destination) {
            warn!(destination, "destination limit reached, ignoring");
        }
    }

    let geocoder = GeocodeClient::from_env()
        .with_context(|| format!("{GRAPHHOPPER_API_KEY_VAR} must be set"))?;

    let provider = match args.provider {
        ProviderArg::Graphhopper => TravelMatrixProvider::GraphHopperApi {
            gh_profile: args.profile.into(),
        },
        ProviderArg::CrowFly => TravelMatrixProvider::AsTheCrowFlies {
            speed_kmh: args.speed_kmh,
        },
    };
    let matrices = ConfiguredMatrixClient {
        client: TravelMatrixClient::from_env()?,
        provider,
    };

    let optimizer = OptimizerClient::new(&args.backend_url);

    let mut planner = TripPlanner::new(geocoder, matrices, optimizer);

    let plan = match planner.submit(&form, args.metric, args.algorithm).await {
        Ok(plan) => plan,
        Err(error) => {
            eprintln!("{}", error.user_message());
            return Err(error.into());
        }
    };

    let mut table = Table::new();
    table.set_header(vec!["Stop", "Place", "Latitude", "Longitude"]);
    for marker in &plan.markers {
        table.add_row(vec![
            marker.label.to_string(),
            marker.place.name.clone(),
            format!("{:.5}", marker.place.lat()),
            format!("{:.5}", marker.place.lon()),
        ]);
    }
    println!("{table}");

    println!(
        "Round trip ({} first, {} algorithm): {:.1} km, {:.0} min",
        args.metric,
        args.algorithm,
        plan.total_distance_meters / 1000.0,
        plan.total_duration_seconds / 60.0,
    );

    Ok(())
}
