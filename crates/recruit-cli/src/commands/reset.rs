//! `recruit reset` command implementation

use crate::error::Result;
use colored::Colorize;
use recruit_common::RecruitError;
use recruit_ingest::{checkpoint, Checkpoint};
use std::path::Path;
use tracing::{info, warn};

/// Overwrite the checkpoint of `database` with `row`. A corrupt checkpoint is
/// replaced as well.
pub fn run(database: &Path, row: usize) -> Result<()> {
    if row == 0 {
        return Err(RecruitError::InvalidRowNumber.into());
    }

    let path = Checkpoint::path_for(database);
    let previous = match checkpoint::load(&path) {
        Ok(previous) => previous.to_string(),
        Err(e) => {
            warn!(error = %e, "Replacing unreadable checkpoint");
            "?".to_string()
        }
    };

    checkpoint::save(&path, row)?;
    info!(%previous, row, "Checkpoint reset");

    println!("{}", "Checkpoint reset".green().bold());
    println!("  Next row: {} -> {}", previous, row);
    Ok(())
}
