//! Checkpoint cursor
//!
//! The checkpoint is the 1-based number of the next unprocessed row, stored as
//! plain decimal text in a file named `status` next to the database file.

use recruit_common::{RecruitError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the checkpoint, relative to the database file's directory
pub const CHECKPOINT_FILE: &str = "status";

/// Read the checkpoint at `path`; 1 when the file does not exist
pub fn load(path: &Path) -> Result<usize> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(1),
        Err(e) => return Err(e.into()),
    };

    match content.trim().parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row),
        _ => Err(RecruitError::CorruptCheckpoint {
            path: path.to_path_buf(),
            content,
        }),
    }
}

/// Overwrite the checkpoint at `path` with `row`
pub fn save(path: &Path, row: usize) -> Result<()> {
    fs::write(path, row.to_string())?;
    Ok(())
}

/// The in-memory cursor, loaded once and saved once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    path: PathBuf,
    next_row: usize,
}

impl Checkpoint {
    /// `<database dir>/status`
    pub fn path_for(database: &Path) -> PathBuf {
        match database.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(CHECKPOINT_FILE),
            _ => PathBuf::from(CHECKPOINT_FILE),
        }
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let next_row = load(&path)?;
        debug!(path = %path.display(), next_row, "Loaded checkpoint");
        Ok(Self { path, next_row })
    }

    pub fn next_row(&self) -> usize {
        self.next_row
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn advance(&mut self) {
        self.next_row += 1;
    }

    pub fn save(&self) -> Result<()> {
        save(&self.path, self.next_row)?;
        debug!(path = %self.path.display(), next_row = self.next_row, "Saved checkpoint");
        Ok(())
    }
}
