//! frepp-catalog - ESM catalogs for frepp post-processing output
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use frepp_catalog::config::{CatalogConfig, CliArgs};
use frepp_catalog::progress::{print_header, print_summary, ProgressReporter};
use frepp_catalog::CatalogBuilder;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();

    setup_logging(args.verbose);

    let config = CatalogConfig::from_args(args).context("Invalid configuration")?;

    if config.show_progress {
        print_header(
            &config.root.display().to_string(),
            config.worker_count,
            &config.identifier,
        );
    }

    if !config.overrides.is_empty() {
        info!(overrides = ?config.overrides, "Applying attribute overrides");
    }

    let progress = config.show_progress.then(ProgressReporter::new);
    if let Some(ref p) = progress {
        p.set_status("Scanning for netCDF files...");
    }

    let builder = CatalogBuilder::new(config.clone());
    let result = builder.build();

    if let Some(ref p) = progress {
        match &result {
            Ok(_) => p.finish("Catalog written"),
            Err(_) => p.finish_and_clear(),
        }
    }

    let report = result
        .with_context(|| format!("Failed to catalog '{}'", config.root.display()))?;

    if config.show_progress {
        print_summary(&report);
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("frepp_catalog=debug,warn")
    } else {
        EnvFilter::new("frepp_catalog=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
