// src/routes.rs
use warp::reject::Rejection;
use crate::handlers::{bounds::get_bounds, calculate::get_calculate, calculate::get_defaults,
                     calculate::post_calculate, calculate::post_schedule};
use log::{info, warn};

use std::collections::HashMap;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Reply};
use crate::handlers::error::ApiError;

const MAX_BODY_BYTES: u64 = 16 * 1024;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        warn!("Malformed request body: {}", e);
        code = StatusCode::BAD_REQUEST;
        message = format!("Invalid request body: {}", e);
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        code = StatusCode::PAYLOAD_TOO_LARGE;
        message = "Payload Too Large".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes() -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let json_body = warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json());

    let calculate_route = warp::path!("api" / "v1" / "calculate")
        .and(warp::post())
        .and(json_body.clone())
        .and_then(post_calculate);

    let calculate_query_route = warp::path!("api" / "v1" / "calculate")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and_then(get_calculate);

    let schedule_route = warp::path!("api" / "v1" / "schedule")
        .and(warp::post())
        .and(json_body)
        .and_then(post_schedule);

    let defaults_route = warp::path!("api" / "v1" / "defaults")
        .and(warp::get())
        .and_then(get_defaults);

    let bounds_route = warp::path!("api" / "v1" / "bounds")
        .and(warp::get())
        .and_then(get_bounds);

    info!("All routes configured successfully.");

    calculate_route
        .or(calculate_query_route)
        .or(schedule_route)
        .or(defaults_route)
        .or(bounds_route)
        .recover(handle_rejection)
}
