//! Rent or Own CLI
//!
//! Prints mortgage schedules and runs rent-versus-own projections

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rent_or_own::{
    mortgage::{default_start_date, AmortizationConfig, AmortizationEngine, Loan, PaymentFrequency},
    Assumptions, RentOrOwnConfig, RentOrOwnProjector,
};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rent_or_own")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory of assumption CSVs; built-in defaults when omitted
    #[arg(short, long, global = true)]
    assumptions: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the amortization schedule of a mortgage
    Amortize {
        /// Amount borrowed
        #[arg(short, long)]
        principal: f64,

        /// Posted nominal annual rate, e.g. 0.05
        #[arg(short, long)]
        rate: f64,

        /// Amortization period in years
        #[arg(short, long, default_value = "25")]
        years: u32,

        /// monthly, bi_weekly or acc_bi_weekly
        #[arg(short, long, default_value = "monthly")]
        frequency: PaymentFrequency,

        /// Extra principal paid every period
        #[arg(long, default_value = "0")]
        additional: f64,

        /// First payment date (YYYY-MM-DD); defaults to the first of next month
        #[arg(short, long)]
        start: Option<NaiveDate>,

        /// Aggregate bi-weekly payments by calendar month
        #[arg(long)]
        monthly: bool,

        /// Write the full schedule to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Project owner and renter net worth from a JSON config
    Project {
        /// Path to a RentOrOwnConfig JSON file
        #[arg(short, long)]
        config: PathBuf,

        /// Override the number of simulations
        #[arg(short = 'n', long)]
        simulations: Option<usize>,

        /// Override the seed
        #[arg(long)]
        seed: Option<u64>,

        /// Write per-month percentiles to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Amortize {
            principal,
            rate,
            years,
            frequency,
            additional,
            start,
            monthly,
            output,
        } => {
            let loan = Loan::new(principal, years, rate, frequency)?;
            let config = AmortizationConfig::starting(start.unwrap_or_else(default_start_date))
                .with_additional_payment(additional);
            let schedule = AmortizationEngine::new(loan, config)?.amortize();

            println!("Mortgage: ${:.2} over {} years at {:.3}% ({})", principal, years, rate * 100.0, frequency);
            println!("Scheduled payment: ${:.2}", schedule.scheduled_payment);
            println!();

            if monthly {
                println!("{:>10} {:>14} {:>12} {:>12} {:>12} {:>14}",
                    "Month", "Begin", "Payment", "Principal", "Interest", "End");
                println!("{}", "-".repeat(80));
                for row in schedule.to_monthly() {
                    println!("{:>10} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                        row.month.format("%Y-%m"),
                        row.beginning_balance,
                        row.total_payment,
                        row.principal,
                        row.interest,
                        row.ending_balance,
                    );
                }
            } else {
                println!("{:>6} {:>12} {:>14} {:>12} {:>12} {:>12} {:>10} {:>14}",
                    "Period", "Date", "Begin", "Payment", "Principal", "Interest", "Extra", "End");
                println!("{}", "-".repeat(100));
                for row in schedule.rows() {
                    println!("{:>6} {:>12} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>10.2} {:>14.2}",
                        row.period,
                        row.date,
                        row.beginning_balance,
                        row.payment,
                        row.principal,
                        row.interest,
                        row.additional_payment,
                        row.ending_balance,
                    );
                }
            }

            let summary = schedule.summary();
            println!("\nSummary:");
            println!("  Payments: {}", summary.total_periods);
            println!("  Total Interest: ${:.2}", summary.total_interest);
            println!("  Total Paid: ${:.2}", summary.total_paid);
            if let Some(date) = summary.payoff_date {
                println!("  Paid Off: {}", date);
            }

            if let Some(path) = output {
                let mut file = File::create(&path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                writeln!(file, "Period,Date,BeginningBalance,Payment,Principal,Interest,AdditionalPayment,EndingBalance")?;
                for row in schedule.rows() {
                    writeln!(file, "{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
                        row.period,
                        row.date,
                        row.beginning_balance,
                        row.payment,
                        row.principal,
                        row.interest,
                        row.additional_payment,
                        row.ending_balance,
                    )?;
                }
                println!("\nSchedule written to: {}", path.display());
            }
        }

        Commands::Project {
            config: config_path,
            simulations,
            seed,
            output,
        } => {
            let assumptions = load_assumptions(cli.assumptions.as_deref())?;
            let json = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Unable to read {}", config_path.display()))?;
            let mut config: RentOrOwnConfig = serde_json::from_str(&json)
                .with_context(|| format!("Invalid projection config in {}", config_path.display()))?;
            if let Some(n) = simulations {
                config.num_simulations = n;
            }
            if seed.is_some() {
                config.seed = seed;
            }

            let projection = RentOrOwnProjector::new(assumptions, config).project()?;
            let summary = projection.summary();

            println!("Rent vs Own: {} months x {} simulations (seed {})",
                summary.periods,
                summary.simulations,
                projection.seed().unwrap_or_default());
            println!("  Mortgage: ${:.2}, upfront cash ${:.2}", summary.mortgage, summary.upfront_cash);
            println!("  Scheduled payment: ${:.2}, total interest ${:.2}", summary.scheduled_payment, summary.total_interest);
            println!();
            println!("{:>8} {:>16} {:>16} {:>16} {:>16}", "", "Mean", "P05", "Median", "P95");
            for (label, stats) in [("Own", summary.own), ("Rent", summary.rent)] {
                println!("{:>8} {:>16.0} {:>16.0} {:>16.0} {:>16.0}",
                    label, stats.mean, stats.p05, stats.median, stats.p95);
            }
            println!("\nOwning ahead in {:.1}% of simulations", summary.own_ahead_share * 100.0);

            if let Some(path) = output {
                let mut writer = csv::Writer::from_path(&path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                for row in projection.percentile_rows() {
                    writer.serialize(row)?;
                }
                writer.flush()?;
                println!("\nPercentiles written to: {}", path.display());
            }
        }
    }

    Ok(())
}

fn load_assumptions(path: Option<&std::path::Path>) -> Result<Assumptions> {
    match path {
        Some(dir) => Assumptions::from_csv_path(dir)
            .map_err(|e| anyhow::anyhow!("Unable to load assumptions from {}: {}", dir.display(), e)),
        None => Ok(Assumptions::default_alberta()),
    }
}
