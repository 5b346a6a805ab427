use dotenv::dotenv;
use log::{info, warn};
use warp::Filter;
use std::env;
use std::net::SocketAddr;

use opportunity_cost_calculator::routes;
use opportunity_cost_calculator::services::session::CalculatorSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    // Example output before any request comes in
    let session = CalculatorSession::new();
    match session.result() {
        Some(result) => info!("Default plan {:?} -> {:?}", session.input(), result),
        None => warn!("Default plan produced no result"),
    }

    let port_str = env::var("PORT").unwrap_or_else(|_| {
        warn!("$PORT not set, defaulting to 3030");
        "3030".to_string()
    });

    let port: u16 = port_str
        .parse()
        .map_err(|e| anyhow::anyhow!("PORT must be a number, got {:?}: {}", port_str, e))?;
    info!("Using PORT: {}", port);

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST"]);

    let api = routes::routes().with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api)
        .run(addr)
        .await;

    Ok(())
}
