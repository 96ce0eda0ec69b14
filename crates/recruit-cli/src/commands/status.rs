//! `recruit status` command implementation

use crate::error::Result;
use colored::Colorize;
use recruit_ingest::{checkpoint, Checkpoint};
use std::path::Path;

/// Print the next row an import of `database` will start from
pub fn run(database: &Path) -> Result<usize> {
    let path = Checkpoint::path_for(database);
    let next_row = checkpoint::load(&path)?;

    println!("{}", "Checkpoint".cyan().bold());
    println!("  Next row: {}", next_row);
    if path.exists() {
        println!("  File:     {}", path.display());
    } else {
        println!("  No checkpoint yet, an import starts from the first row.");
    }

    Ok(next_row)
}
