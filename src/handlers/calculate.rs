// src/handlers/calculate.rs
use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use warp::reply::Json;
use warp::Rejection;
use log::{debug, error, info};
use crate::models::{CalculationInput, CalculationResult, InputField, MonthlyRow};
use crate::services::calculations::{calculate_opportunity_cost, monthly_schedule};
use crate::services::formatting::{present, ResultCard};
use crate::services::session::CalculatorSession;
use crate::services::validation::validate_input;
use super::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub input: CalculationInput,
    pub result: CalculationResult,
    pub cards: Vec<ResultCard>,
    pub calculated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub input: CalculationInput,
    pub rows: Vec<MonthlyRow>,
}

fn check_input(input: &CalculationInput) -> Result<(), ApiError> {
    validate_input(input).map_err(|e| {
        error!("Rejected calculation input: {}", e);
        ApiError::invalid_input(e.to_string())
    })
}

pub fn run_calculation(input: CalculationInput) -> Result<CalculationResponse, ApiError> {
    check_input(&input)?;
    let result = calculate_opportunity_cost(&input).map_err(|e| {
        error!("Calculation failed: {}", e);
        ApiError::invalid_input(e.to_string())
    })?;

    Ok(CalculationResponse {
        input,
        result,
        cards: present(&input, &result),
        calculated_at: Utc::now(),
    })
}

pub async fn post_calculate(input: CalculationInput) -> Result<Json, Rejection> {
    info!("Handling request to calculate opportunity cost");
    debug!("Calculation input: {:?}", input);

    let response = run_calculation(input).map_err(warp::reject::custom)?;
    info!("Calculated total opportunity cost: {:.0}", response.result.total_opportunity_cost);
    Ok(warp::reply::json(&response))
}

/// Starts from the defaults and applies each query parameter as a typed form edit,
/// e.g. `?years=10&interestRate=5.5`.
pub async fn get_calculate(params: HashMap<String, String>) -> Result<Json, Rejection> {
    info!("Handling request to calculate from {} form edits", params.len());

    let mut session = CalculatorSession::with_input(CalculationInput::default());
    for (key, raw) in &params {
        let field: InputField = key.parse().map_err(|e: String| {
            error!("{}", e);
            warp::reject::custom(ApiError::invalid_input(e))
        })?;
        session.set_field_text(field, raw);
    }

    let response = run_calculation(*session.input()).map_err(warp::reject::custom)?;
    Ok(warp::reply::json(&response))
}

pub async fn get_defaults() -> Result<Json, Rejection> {
    info!("Handling request to get default calculation");
    // The defaults are fixed, so failing here is a server fault
    let response = run_calculation(CalculationInput::default())
        .map_err(|e| warp::reject::custom(ApiError::new(e.message)))?;
    Ok(warp::reply::json(&response))
}

pub async fn post_schedule(input: CalculationInput) -> Result<Json, Rejection> {
    info!("Handling request to get monthly schedule");

    check_input(&input).map_err(warp::reject::custom)?;
    let rows = monthly_schedule(&input).map_err(|e| {
        error!("Schedule failed: {}", e);
        warp::reject::custom(ApiError::invalid_input(e.to_string()))
    })?;

    debug!("Returning {} schedule rows", rows.len());
    Ok(warp::reply::json(&ScheduleResponse { input, rows }))
}
