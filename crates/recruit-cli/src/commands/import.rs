//! `recruit import` command implementation
//!
//! Submits candidates row by row, resuming from the checkpoint next to the
//! database file.

use crate::api::ApiClient;
use crate::config::ImportConfig;
use crate::error::{CliError, Result};
use crate::submitter::ApiSubmitter;
use colored::Colorize;
use recruit_ingest::{DryRunSubmitter, IngestReport};
use tracing::info;

/// Run an import and print a summary.
///
/// A dry run walks the same rows through [`DryRunSubmitter`] and leaves the
/// checkpoint untouched.
pub fn run(config: &ImportConfig) -> Result<IngestReport> {
    let ingestor = config.ingestor()?;
    let checkpoint_path = config.checkpoint_path();

    if config.dry_run {
        info!("Dry run: nothing will be sent");
        let report =
            ingestor.rehearse(&config.database, &checkpoint_path, &mut DryRunSubmitter::new())?;

        println!("{}", "Dry run finished".green().bold());
        println!("  Rows:      {}..{}", report.first_row, report.next_row);
        println!("  Submitted: {}", report.submitted);
        println!("  Checkpoint: {} (not changed)", checkpoint_path.display());
        return Ok(report);
    }

    let token = config
        .token
        .clone()
        .ok_or_else(|| CliError::config("API token missing"))?;
    let client = ApiClient::new(config.api_url.clone(), token, config.timeout)?;
    let mut submitter =
        ApiSubmitter::connect(client, config.account_index, config.resume_dir.clone())?;

    let report = ingestor.run(&config.database, &checkpoint_path, &mut submitter)?;

    println!("{}", "Import finished".green().bold());
    println!("  Rows:      {}..{}", report.first_row, report.next_row);
    println!("  Submitted: {}", report.submitted);
    println!("  Created:   {}", report.created);
    println!("  Warnings:  {}", report.warnings);
    println!("  Checkpoint: {}", checkpoint_path.display());
    if report.warnings > 0 {
        println!("{}", "Some rows were submitted incompletely, see the log".yellow());
    }

    Ok(report)
}
