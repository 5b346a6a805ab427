// src/services/validation.rs
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use log::debug;
use regex::Regex;
use crate::models::{CalculationInput, FieldBounds, InputField};

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NotFinite(InputField),
    OutOfRange { field: InputField, value: f64, bounds: FieldBounds },
    IrregularDividendFrequency(u32),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::NotFinite(field) => write!(f, "{} must be a finite number", field),
            ValidationError::OutOfRange { field, value, bounds } => write!(
                f,
                "{} must be between {} and {}, got {}",
                field, bounds.min, bounds.max, value
            ),
            ValidationError::IrregularDividendFrequency(frequency) => write!(
                f,
                "dividendFrequency must divide 12 (1, 2, 3, 4, 6 or 12), got {}",
                frequency
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Payment counts per year that give a whole number of months between dividends.
pub const REGULAR_DIVIDEND_FREQUENCIES: [u32; 6] = [1, 2, 3, 4, 6, 12];

pub fn bounds(field: InputField) -> FieldBounds {
    let (min, max, step) = match field {
        InputField::MonthlyInvestment => (100_000.0, 10_000_000.0, 100_000.0),
        InputField::StockPrice => (10_000.0, 200_000.0, 1_000.0),
        InputField::DividendRate => (0.0, 50.0, 0.5),
        InputField::DividendFrequency => (1.0, 12.0, 1.0),
        InputField::Years => (1.0, 50.0, 1.0),
        InputField::InterestRate => (0.0, 20.0, 0.1),
    };
    FieldBounds { min, max, step }
}

pub fn all_bounds() -> HashMap<&'static str, FieldBounds> {
    InputField::ALL
        .iter()
        .map(|field| (field.id(), bounds(*field)))
        .collect()
}

pub fn validate_field(field: InputField, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite(field));
    }
    let bounds = bounds(field);
    if value < bounds.min || value > bounds.max {
        return Err(ValidationError::OutOfRange { field, value, bounds });
    }
    Ok(())
}

pub fn validate_input(input: &CalculationInput) -> Result<(), ValidationError> {
    for field in InputField::ALL {
        validate_field(field, input.get(field))?;
    }
    if !REGULAR_DIVIDEND_FREQUENCIES.contains(&input.dividend_frequency) {
        return Err(ValidationError::IrregularDividendFrequency(input.dividend_frequency));
    }
    debug!("Input passed validation: {:?}", input);
    Ok(())
}

static NUMBER_PREFIX: OnceLock<Regex> = OnceLock::new();

fn number_prefix() -> &'static Regex {
    NUMBER_PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
            .expect("number prefix pattern is valid")
    })
}

/// Number-box semantics: reads the leading number and ignores the rest, so `12abc`
/// is 12. Text without a leading number reads as 0.
pub fn parse_field_value(raw: &str) -> f64 {
    let value = number_prefix()
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);
    if value.is_nan() { 0.0 } else { value }
}

/// Slider semantics: clamp into range, then round to the nearest step from `min`.
pub fn snap_to_step(field: InputField, value: f64) -> f64 {
    let bounds = bounds(field);
    if value.is_nan() {
        return bounds.min;
    }
    let clamped = value.clamp(bounds.min, bounds.max);
    let steps = ((clamped - bounds.min) / bounds.step).round();
    // Re-derive from the step count so 0.1 steps do not drift, then clamp again
    let snapped = bounds.min + steps * bounds.step;
    let decimals = step_decimals(bounds.step);
    let factor = 10f64.powi(decimals);
    ((snapped * factor).round() / factor).clamp(bounds.min, bounds.max)
}

/// A typed value as the collector accepts it: leading number, clamped and snapped.
pub fn collect_field(field: InputField, raw: &str) -> f64 {
    snap_to_step(field, parse_field_value(raw))
}

fn step_decimals(step: f64) -> i32 {
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < 6 && (scaled - scaled.round()).abs() > 1e-9 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}
