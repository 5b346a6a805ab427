// src/handlers/bounds.rs
use warp::reply::Json;
use warp::Rejection;
use crate::services::validation::all_bounds;
use log::info;

pub async fn get_bounds() -> Result<Json, Rejection> {
    info!("Handling request to get input bounds");
    Ok(warp::reply::json(&all_bounds()))
}
