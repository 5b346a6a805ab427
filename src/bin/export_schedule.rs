// src/bin/export_schedule.rs
use anyhow::Context;
use dotenv::dotenv;
use log::info;
use std::{env, fs, io};
use opportunity_cost_calculator::models::CalculationInput;
use opportunity_cost_calculator::services::calculations::schedule_rows;
use opportunity_cost_calculator::services::validation::validate_input;

// usage: export_schedule [input.json] [out.csv]
fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut args = env::args().skip(1);
    let input: CalculationInput = match args.next() {
        Some(path) if path != "-" => {
            let raw = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("Invalid input JSON in {}", path))?
        }
        _ => CalculationInput::default(),
    };

    validate_input(&input)?;
    let rows = schedule_rows(&input)?;

    let out: Box<dyn io::Write> = match args.next() {
        Some(path) => {
            info!("Writing {} rows to {}", input.total_months(), path);
            Box::new(fs::File::create(&path).with_context(|| format!("Failed to create {}", path))?)
        }
        None => Box::new(io::stdout()),
    };

    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
