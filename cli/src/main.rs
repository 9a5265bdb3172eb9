//! Advisory fee quote CLI
//!
//! Thin host around the fee engine with three commands:
//! - quote: price a free-text enterprise value
//! - table: fee at every band ceiling
//! - schedule: show the active schedule and its fingerprint

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use advisory_fee_core_rs::{
    format_amount, format_currency, format_percentage, parse_currency_input, reference_table,
    FeeOutcome, FeeSchedule, FeeSummary,
};

#[derive(Parser)]
#[command(name = "fee-quote")]
#[command(about = "Estimate advisory fees from an enterprise value")]
#[command(version)]
struct Cli {
    /// JSON fee schedule to use instead of the standard schedule
    #[arg(short, long, global = true)]
    schedule: Option<PathBuf>,

    /// Emit JSON instead of a text table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the fee for an enterprise value, e.g. "$12,500,000"
    Quote {
        /// Enterprise value; everything except digits and '.' is ignored
        enterprise_value: String,
    },

    /// Fee quoted at the top of every band
    Table,

    /// Show the active schedule
    Schedule,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let loaded;
    let schedule = match &cli.schedule {
        Some(path) => {
            loaded = load_schedule(path)?;
            &loaded
        }
        None => FeeSchedule::standard(),
    };

    match cli.command {
        Commands::Quote { enterprise_value } => quote(schedule, &enterprise_value, cli.json),
        Commands::Table => table(schedule, cli.json),
        Commands::Schedule => show_schedule(schedule, cli.json),
    }
}

fn load_schedule(path: &Path) -> Result<FeeSchedule> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schedule file {}", path.display()))?;
    FeeSchedule::from_json_str(&json)
        .with_context(|| format!("Invalid schedule in {}", path.display()))
}

fn quote(schedule: &FeeSchedule, input: &str, json: bool) -> Result<()> {
    let enterprise_value = parse_currency_input(input);
    tracing::debug!(input, enterprise_value, "parsed enterprise value");

    let outcome = schedule
        .evaluate(enterprise_value)
        .with_context(|| format!("Cannot price enterprise value '{}'", input))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        FeeOutcome::Priced(result) => println!("{}", FeeSummary::from(&result)),
        FeeOutcome::Ineligible {
            enterprise_value,
            minimum,
        } => println!(
            "Enterprise value {} is below the minimum of {}; no fee schedule applies.",
            format_currency(enterprise_value),
            format_amount(minimum)
        ),
    }
    Ok(())
}

fn table(schedule: &FeeSchedule, json: bool) -> Result<()> {
    let rows = reference_table(schedule).context("Failed to build reference table")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<16} {:>14} {:>14} {:>14} {:>14} {:>8}",
        "Band", "EV", "Fixed", "Sliding", "Total", "% of EV"
    );
    for row in rows {
        println!(
            "{:<16} {:>14} {:>14} {:>14} {:>14} {:>8}",
            row.band_label,
            format_amount(row.enterprise_value),
            format_amount(row.fixed_fee_total),
            format_amount(row.sliding_scale_total),
            format_amount(row.total_fee),
            format_percentage(row.percentage_of_ev)
        );
    }
    Ok(())
}

fn show_schedule(schedule: &FeeSchedule, json: bool) -> Result<()> {
    if json {
        println!("{}", schedule.to_json_pretty()?);
        return Ok(());
    }

    println!("Floor: {}", format_amount(schedule.floor()));
    println!("Cap:   {}", format_amount(schedule.cap()));
    println!("Fingerprint: {}", schedule.fingerprint()?);
    println!();
    for band in schedule.bands() {
        let fixed = band
            .fixed_fees
            .iter()
            .map(|fee| format!("{} {}", fee.name, format_amount(fee.amount)))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<16} {:>7.2}%  {}",
            band.label,
            band.sliding_scale_rate * 100.0,
            fixed
        );
    }
    Ok(())
}
