//! Run every scenario in a CSV file and write one summary row per scenario
//!
//! Usage: run_scenarios [scenarios.csv] [output.csv]

use anyhow::{anyhow, Context, Result};
use rent_or_own::scenario::{load_scenarios, ScenarioSpec};
use rent_or_own::{Assumptions, ScenarioRunner};
use std::fs::File;
use std::io::Write;
use std::time::Instant;

const DEFAULT_SCENARIOS: &str = "data/scenarios/edmonton.csv";
const DEFAULT_OUTPUT: &str = "scenario_summary.csv";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let scenarios_path = args.next().unwrap_or_else(|| DEFAULT_SCENARIOS.to_string());
    let output_path = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let start = Instant::now();
    println!("Loading scenarios from {}...", scenarios_path);
    let scenarios: Vec<ScenarioSpec> =
        load_scenarios(&scenarios_path).map_err(|e| anyhow!("Failed to load {}: {}", scenarios_path, e))?;
    println!("Loaded {} scenarios", scenarios.len());

    let runner = match Assumptions::from_csv() {
        Ok(assumptions) => ScenarioRunner::with_assumptions(assumptions),
        Err(e) => {
            log::warn!("Using built-in assumptions: {}", e);
            ScenarioRunner::new()
        }
    };

    println!("Running projections...");
    let proj_start = Instant::now();
    let configs: Vec<_> = scenarios.iter().map(|s| s.config.clone()).collect();
    let results = runner.run_batch(&configs);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut file = File::create(&output_path).with_context(|| format!("Failed to create {}", output_path))?;
    writeln!(file, "Scenario,Months,Simulations,Mortgage,UpfrontCash,Payment,TotalInterest,OwnMedian,OwnP05,OwnP95,RentMedian,RentP05,RentP95,OwnAheadShare")?;

    println!("\n{:<24} {:>7} {:>12} {:>14} {:>14} {:>8}", "Scenario", "Months", "Payment", "Own Median", "Rent Median", "Own %");
    println!("{}", "-".repeat(84));

    for (scenario, result) in scenarios.iter().zip(results) {
        let projection = match result {
            Ok(projection) => projection,
            Err(e) => {
                println!("{:<24} failed: {}", scenario.name, e);
                continue;
            }
        };
        let summary = projection.summary();

        writeln!(
            file,
            "{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.4}",
            scenario.name,
            summary.periods,
            summary.simulations,
            summary.mortgage,
            summary.upfront_cash,
            summary.scheduled_payment,
            summary.total_interest,
            summary.own.median,
            summary.own.p05,
            summary.own.p95,
            summary.rent.median,
            summary.rent.p05,
            summary.rent.p95,
            summary.own_ahead_share,
        )?;

        println!(
            "{:<24} {:>7} {:>12.2} {:>14.0} {:>14.0} {:>7.1}%",
            scenario.name,
            summary.periods,
            summary.scheduled_payment,
            summary.own.median,
            summary.rent.median,
            summary.own_ahead_share * 100.0,
        );
    }

    println!("\nOutput written to {}", output_path);
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
