// src/bin/audit_deck_csvs.rs
//! Audit the header row of every `hitster-de*.csv` deck under the current directory.

use anyhow::{Context, Result};
use clap::Parser;
use hitster_audit::deck::{audit_file, discover_csvs, format_result};
use hitster_audit::logging;
use tracing::{error, info};

/// Check hitster-de deck CSVs for canonical column names.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();
    logging::init();

    let root = std::env::current_dir().context("resolving current directory")?;
    let csv_files = discover_csvs(&root)?;
    info!(root = %root.display(), count = csv_files.len(), "discovered deck files");

    if csv_files.is_empty() {
        println!("No hitster-de*.csv files were found under {}", root.display());
        println!("Add the decks and re-run this script to verify column mappings.");
        return Ok(());
    }

    println!("Found {} hitster-de CSV file(s).\n", csv_files.len());
    for csv_path in &csv_files {
        match audit_file(csv_path) {
            Ok(Some(result)) => {
                println!("{}", format_result(&result, &root));
                println!();
            }
            Ok(None) => println!("File: {} is empty; skipping.", csv_path.display()),
            Err(e) => error!(path = %csv_path.display(), error = ?e, "could not audit file"),
        }
    }
    Ok(())
}
