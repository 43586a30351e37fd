pub mod geocode_client;
pub mod place;
