//! `recruit preview` command implementation
//!
//! Prints one JSON object per record on stdout, starting at the checkpoint.
//! The checkpoint is not modified.

use crate::error::Result;
use crate::SourceArgs;
use recruit_ingest::{checkpoint, Checkpoint};
use serde_json::json;

pub fn run(source: &SourceArgs, rows: usize) -> Result<usize> {
    let from_row = checkpoint::load(&Checkpoint::path_for(&source.database))?;
    let records = source.ingestor()?.preview(&source.database, from_row, rows)?;

    for (row, record) in &records {
        println!("{}", serde_json::to_string(&json!({ "row": row, "record": record }))?);
    }

    if records.is_empty() {
        eprintln!("No records from row {} onward.", from_row);
    }

    Ok(records.len())
}
