//! Net Worth Projector CLI
//!
//! Loads a JSON configuration, builds the ledger, prints a balance preview,
//! and persists the full table to a timestamped execution directory.

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use networth_projector::ledger::{ASSETS, CASH_BALANCE, LIABILITIES, NET_CASH, NET_WORTH};
use networth_projector::{build_instruments, load_config, LedgerBuilder};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "networth_projector", about = "Project household net worth month by month")]
struct Args {
    /// Path to the JSON configuration file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Directory receiving timestamped execution outputs
    #[arg(long, default_value = "executions")]
    out_dir: PathBuf,

    /// Number of months to preview on stdout
    #[arg(long, default_value_t = 24)]
    preview: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Net Worth Projector v0.1.0");
    println!("==========================\n");

    let config = load_config(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    let base_dir = args.config.parent().unwrap_or_else(|| Path::new("."));

    let instruments = build_instruments(&config, base_dir).context("failed to build instruments")?;
    println!(
        "Instruments: {} ({} loans, {} assets, {} incomes)",
        instruments.len(),
        config.loans.len(),
        config.assets.len(),
        config.incomes.len()
    );

    let mut builder = LedgerBuilder::new();
    for instrument in instruments {
        builder.register(instrument);
    }
    let ledger = builder.finalize().context("failed to build ledger")?;

    // Every run gets its own directory holding the config it ran with
    let run_dir = args
        .out_dir
        .join(Local::now().format("%Y%m%d%H%M%S").to_string());
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create {}", run_dir.display()))?;
    fs::copy(&args.config, run_dir.join("config.json")).context("failed to copy config")?;

    // Print balance preview
    println!("\nProjection ({} months):", ledger.len());
    println!(
        "{:>8} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "Month", "NetCash", "CashBalance", "Assets", "Liabilities", "NetWorth"
    );
    println!("{}", "-".repeat(84));

    let net_cash = column(&ledger, NET_CASH)?;
    let cash_balance = column(&ledger, CASH_BALANCE)?;
    let assets = column(&ledger, ASSETS)?;
    let liabilities = column(&ledger, LIABILITIES)?;
    let net_worth = column(&ledger, NET_WORTH)?;

    for (month, ts) in ledger.timestamps().iter().enumerate().take(args.preview) {
        println!(
            "{:>8} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            ts.raw(),
            net_cash[month],
            cash_balance[month],
            assets[month],
            liabilities[month],
            net_worth[month]
        );
    }
    if ledger.len() > args.preview {
        println!("... ({} more months)", ledger.len() - args.preview);
    }

    // Write the full table to CSV
    let csv_path = run_dir.join("ledger.csv");
    let mut file = File::create(&csv_path)
        .with_context(|| format!("failed to create {}", csv_path.display()))?;

    write!(file, "timestamp")?;
    for name in ledger.column_names() {
        write!(file, ",{}", name)?;
    }
    writeln!(file)?;

    for (month, ts) in ledger.timestamps().iter().enumerate() {
        write!(file, "{}", ts)?;
        for col in ledger.columns() {
            write!(file, ",{:.2}", col.values[month])?;
        }
        writeln!(file)?;
    }

    println!("\nFull ledger written to: {}", csv_path.display());

    // Print summary
    let summary = ledger.summary();
    println!("\nSummary:");
    println!("  Total Months: {}", summary.months);
    println!("  Final Cash Balance: ${:.2}", summary.final_cash_balance);
    println!("  Final Assets: ${:.2}", summary.final_assets);
    println!("  Final Liabilities: ${:.2}", summary.final_liabilities);
    println!("  Final Net Worth: ${:.2}", summary.final_net_worth);

    // Key milestone months for a quick read of the trajectory
    println!("\nKey Milestones:");
    for &month in &[1usize, 12, 24, 60, 120] {
        if let Some(ts) = ledger.timestamps().get(month - 1) {
            println!(
                "  Month {:>3} ({}): CashBalance={:.2} NetWorth={:.2}",
                month,
                ts,
                cash_balance[month - 1],
                net_worth[month - 1]
            );
        }
    }

    Ok(())
}

fn column<'a>(
    ledger: &'a networth_projector::Ledger,
    name: &str,
) -> anyhow::Result<&'a [f64]> {
    ledger
        .column(name)
        .with_context(|| format!("ledger is missing the {} column", name))
}
