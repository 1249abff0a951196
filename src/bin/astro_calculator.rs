//! Standalone chart calculator.
//!
//! `astro_calculator birth_date(YYYY-MM-DD) birth_time(HH:MM) latitude longitude`
//! prints one JSON object (chart or error envelope) on stdout. Logging goes
//! to stderr so stdout stays machine-readable.

use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use natal_core::compute_chart;

const ARGUMENT_ERROR: &str = "Incorrect arguments. Required: birth_date birth_time latitude longitude";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((date, time, latitude, longitude)) = parse_args(&args) else {
        println!("{}", serde_json::json!({ "error": ARGUMENT_ERROR }));
        return ExitCode::FAILURE;
    };

    let result = compute_chart(date, time, latitude, longitude);
    match serde_json::to_string(&result) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!(
                "{}",
                serde_json::json!({ "error": err.to_string(), "sunSign": "Unknown" })
            );
            ExitCode::FAILURE
        }
    }
}

/// Exactly four positional arguments, with numeric coordinates.
fn parse_args(args: &[String]) -> Option<(&str, &str, f64, f64)> {
    match args {
        [date, time, lat, lon] => {
            let latitude = lat.parse::<f64>().ok()?;
            let longitude = lon.parse::<f64>().ok()?;
            Some((date, time, latitude, longitude))
        }
        _ => None,
    }
}
