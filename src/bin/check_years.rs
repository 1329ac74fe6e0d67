// src/bin/check_years.rs
//! Inspect a Songseeker dataset for release-year information.
//!
//! Exit codes: 0 years found, 1 no data files, 2 data files without any year values.

use anyhow::Result;
use clap::Parser;
use hitster_audit::logging;
use hitster_audit::years::inspect_dataset;
use std::{path::PathBuf, process::ExitCode};

/// Check if Songseeker data contains release years
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to local songseeker repository or exported dataset
    dataset_root: PathBuf,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init();

    let report = inspect_dataset(&args.dataset_root)?;
    print!("{}", report.render());
    Ok(report.outcome().into())
}
