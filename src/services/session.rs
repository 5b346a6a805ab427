// src/services/session.rs
use log::{info, warn};
use crate::models::{CalculationInput, CalculationResult, InputField};
use crate::services::calculations::{calculate_opportunity_cost, CalculationError};
use crate::services::validation::collect_field;

/// The input/result pair a caller owns between calculations.
///
/// Editing a field never touches the result; only `calculate` replaces it, and a
/// rejected input leaves the previous result in place.
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    input: CalculationInput,
    result: Option<CalculationResult>,
}

impl CalculatorSession {
    /// Starts from the default input and runs the engine once so there is an
    /// example result before any edit.
    pub fn new() -> Self {
        let mut session = Self::with_input(CalculationInput::default());
        if let Err(e) = session.calculate() {
            warn!("Default input failed to calculate: {}", e);
        }
        session
    }

    /// A session with no result yet.
    pub fn with_input(input: CalculationInput) -> Self {
        Self { input, result: None }
    }

    pub fn input(&self) -> &CalculationInput {
        &self.input
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    pub fn set_field(&mut self, field: InputField, value: f64) {
        self.input = self.input.with_field(field, value);
    }

    /// Applies text as the input form would: leading number, clamped and snapped
    /// to the field's step.
    pub fn set_field_text(&mut self, field: InputField, raw: &str) {
        self.set_field(field, collect_field(field, raw));
    }

    pub fn set_input(&mut self, input: CalculationInput) {
        self.input = input;
    }

    pub fn calculate(&mut self) -> Result<&CalculationResult, CalculationError> {
        let result = calculate_opportunity_cost(&self.input)?;
        info!("Total opportunity cost: {:.0}", result.total_opportunity_cost);
        let stored = self.result.insert(result);
        Ok(&*stored)
    }
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}
