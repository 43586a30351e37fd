mod algo;
mod error;

use axum::http::Method;
use axum::routing::post;
use axum::{Router, serve};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

fn app() -> Router {
    // the original served a browser front end from another origin
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/algo", post(algo::algo_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let addr =
        std::env::var("ROUNDTRIP_API_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "route optimizer backend listening");

    serve(listener, app()).await?;

    Ok(())
}
