// src/bin/calculate.rs
use anyhow::{anyhow, Context};
use dotenv::dotenv;
use log::info;
use std::{env, fs};
use opportunity_cost_calculator::models::{CalculationInput, InputField};
use opportunity_cost_calculator::services::formatting::present;
use opportunity_cost_calculator::services::session::CalculatorSession;
use opportunity_cost_calculator::services::validation::validate_input;

// usage: calculate [input.json] [field=value ...]
// e.g.   calculate years=10 interestRate=5.5
fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut args = env::args().skip(1).peekable();

    let input: CalculationInput = match args.next_if(|arg| !arg.contains('=')) {
        Some(path) => {
            info!("Reading input from {}", path);
            let raw = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("Invalid input JSON in {}", path))?
        }
        None => CalculationInput::default(),
    };

    let mut session = CalculatorSession::with_input(input);
    for arg in args {
        let (key, raw) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected field=value, got {:?}", arg))?;
        let field: InputField = key.parse().map_err(|e: String| anyhow!(e))?;
        session.set_field_text(field, raw);
        info!("Set {} to {}", field, session.input().get(field));
    }

    validate_input(session.input())?;
    let result = *session.calculate()?;
    let input = *session.input();

    println!("{}", serde_json::to_string_pretty(&input)?);
    println!();
    for card in present(&input, &result) {
        println!("{:<28} {:>24}", card.label, card.formatted);
        println!("    {}", card.description);
    }
    Ok(())
}
