pub mod destination_form;
pub mod error;
pub mod optimizer_client;
pub mod planner;
pub mod trip_plan;
