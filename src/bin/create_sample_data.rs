use anyhow::{Context, Result};
use billability::sample::{SampleOptions, create_sample_workbook};
use billability::utils::today;
use chrono::Datelike;
use clap::Parser;
use std::path::PathBuf;

/// Generate a sample billability workbook for demos and tests
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Where to write the workbook
    #[arg(short, long, default_value = "data/billability_data.xlsx")]
    output: PathBuf,

    /// Year the ongoing projects run in (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Leave out the Daily_Billing sheet
    #[arg(long)]
    without_billing: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();
    let today = today();

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating directory {}", dir.display()))?;
    }

    let options = SampleOptions {
        year: args.year.unwrap_or_else(|| today.year()),
        seed: args.seed,
        today,
        include_daily_billing: !args.without_billing,
    };

    let data = create_sample_workbook(&args.output, &options)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("Sample Excel file created: {}", args.output.display());
    println!("   - {} Employees", data.employees.len());
    println!("   - {} Projects", data.projects.len());
    println!("   - {} Project Assignments", data.assignments.len());
    if options.include_daily_billing {
        println!("   - {} Daily Billing Records", data.daily_billing.len());
    }

    Ok(())
}
