//! Ingestion loop
//!
//! Drives rows from a [`TabularSource`] through a [`RowExtractor`] into a
//! [`Submitter`], one at a time, starting at the persisted checkpoint.
//!
//! The checkpoint is saved on every exit path: normal exhaustion, a fault
//! returned from any step, or a panic unwinding through the loop. It always
//! holds the highest row known to have started processing, so a failed row is
//! retried on the next run (at-least-once).

use crate::checkpoint::Checkpoint;
use crate::extractor::RowExtractor;
use crate::source::TabularSource;
use recruit_common::{Record, RecruitError, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Non-fatal condition scoped to one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum RowWarning {
    VacancyNotFound(String),
    StatusNotFound(String),
    ResumeNotFound,
    MissingName,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowWarning::VacancyNotFound(name) => write!(f, "vacancy '{}' not found", name),
            RowWarning::StatusNotFound(name) => write!(f, "status '{}' not found", name),
            RowWarning::ResumeNotFound => f.write_str("resume file not found"),
            RowWarning::MissingName => f.write_str("no candidate name, row skipped"),
        }
    }
}

/// What happened to one submitted record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Identifier assigned by the receiving side, if anything was created
    pub applicant_id: Option<i64>,
    pub warnings: Vec<RowWarning>,
}

impl SubmitOutcome {
    pub fn created(applicant_id: i64) -> Self {
        Self {
            applicant_id: Some(applicant_id),
            warnings: Vec::new(),
        }
    }

    pub fn skipped(warning: RowWarning) -> Self {
        Self {
            applicant_id: None,
            warnings: vec![warning],
        }
    }

    pub fn warn(&mut self, warning: RowWarning) {
        self.warnings.push(warning);
    }
}

/// Receives extracted records.
///
/// An `Err` is a transport-level fault and stops the run; anything row-local
/// belongs in [`SubmitOutcome::warnings`].
pub trait Submitter {
    fn submit(&mut self, row: usize, record: &Record) -> anyhow::Result<SubmitOutcome>;
}

impl<F> Submitter for F
where
    F: FnMut(usize, &Record) -> anyhow::Result<SubmitOutcome>,
{
    fn submit(&mut self, row: usize, record: &Record) -> anyhow::Result<SubmitOutcome> {
        self(row, record)
    }
}

/// Logs records instead of sending them anywhere. Pair it with
/// [`Ingestor::rehearse`] so the checkpoint stays where it is.
#[derive(Debug, Default)]
pub struct DryRunSubmitter;

impl DryRunSubmitter {
    pub fn new() -> Self {
        Self
    }
}

impl Submitter for DryRunSubmitter {
    fn submit(&mut self, row: usize, record: &Record) -> anyhow::Result<SubmitOutcome> {
        info!(row, record = %serde_json::to_string(record)?, "Dry run");
        Ok(SubmitOutcome::default())
    }
}

/// Summary of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Checkpoint value at start
    pub first_row: usize,
    /// Checkpoint value saved at the end
    pub next_row: usize,
    /// Records handed to the submitter
    pub submitted: usize,
    /// Records the submitter reported as created
    pub created: usize,
    pub warnings: usize,
}

/// Saves the checkpoint when dropped without [`CheckpointGuard::commit`]
struct CheckpointGuard {
    checkpoint: Checkpoint,
    committed: bool,
}

impl CheckpointGuard {
    fn new(checkpoint: Checkpoint) -> Self {
        Self {
            checkpoint,
            committed: false,
        }
    }

    fn commit(mut self) -> Result<usize> {
        self.committed = true;
        self.checkpoint.save()?;
        Ok(self.checkpoint.next_row())
    }
}

impl Drop for CheckpointGuard {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = self.checkpoint.save() {
                error!(error = %e, "Failed to save checkpoint while unwinding");
            }
        }
    }
}

/// Resumable row-by-row ingestion of one spreadsheet
#[derive(Debug)]
pub struct Ingestor {
    extractor: RowExtractor,
    has_header: bool,
    sheet_index: usize,
}

impl Ingestor {
    pub fn new(extractor: RowExtractor) -> Self {
        Self {
            extractor,
            has_header: true,
            sheet_index: 0,
        }
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_sheet(mut self, sheet_index: usize) -> Self {
        self.sheet_index = sheet_index;
        self
    }

    /// Process rows from the checkpoint onward until the source is exhausted
    /// or a fault occurs. The checkpoint at `checkpoint_path` is saved either
    /// way; a fault is returned after the save.
    pub fn run(
        &self,
        database: &Path,
        checkpoint_path: &Path,
        submitter: &mut dyn Submitter,
    ) -> Result<IngestReport> {
        let mut guard = CheckpointGuard::new(Checkpoint::load(checkpoint_path)?);
        let mut report = IngestReport {
            first_row: guard.checkpoint.next_row(),
            ..IngestReport::default()
        };

        info!(
            database = %database.display(),
            first_row = report.first_row,
            "Starting ingestion"
        );

        let outcome = self.drive(database, &mut guard.checkpoint, submitter, &mut report);
        let saved = guard.commit();

        match (outcome, saved) {
            (Ok(()), Ok(next_row)) => {
                report.next_row = next_row;
                info!(
                    next_row,
                    submitted = report.submitted,
                    warnings = report.warnings,
                    "Checkpoint saved"
                );
                Ok(report)
            }
            (Ok(()), Err(e)) => Err(e),
            (Err(e), saved) => {
                if let Err(save_err) = saved {
                    error!(error = %save_err, "Failed to save checkpoint");
                }
                error!(error = %e, "Ingestion aborted");
                Err(e)
            }
        }
    }

    /// Walk the same rows [`Ingestor::run`] would, from the saved checkpoint
    /// to the end of data, without saving anything. `next_row` in the report
    /// is where a real run would stop.
    pub fn rehearse(
        &self,
        database: &Path,
        checkpoint_path: &Path,
        submitter: &mut dyn Submitter,
    ) -> Result<IngestReport> {
        let mut checkpoint = Checkpoint::load(checkpoint_path)?;
        let mut report = IngestReport {
            first_row: checkpoint.next_row(),
            ..IngestReport::default()
        };

        info!(
            database = %database.display(),
            first_row = report.first_row,
            "Starting dry run"
        );

        self.drive(database, &mut checkpoint, submitter, &mut report)?;
        report.next_row = checkpoint.next_row();
        info!(
            next_row = report.next_row,
            submitted = report.submitted,
            "Dry run finished, checkpoint not saved"
        );
        Ok(report)
    }

    fn drive(
        &self,
        database: &Path,
        checkpoint: &mut Checkpoint,
        submitter: &mut dyn Submitter,
        report: &mut IngestReport,
    ) -> Result<()> {
        let mut source = TabularSource::new(self.has_header);
        let session = source.open_scoped(database, self.sheet_index)?;

        loop {
            let row = checkpoint.next_row();
            let record = self.extractor.extract(&session.read_row(row)?)?;
            if record.is_empty() {
                info!(row, "Source exhausted");
                break;
            }

            debug!(row, fields = record.len(), "Processing row");
            let outcome = submitter
                .submit(row, &record)
                .map_err(|source| RecruitError::Submission { row, source })?;

            report.submitted += 1;
            if let Some(applicant_id) = outcome.applicant_id {
                report.created += 1;
                debug!(row, applicant_id, "Submitted");
            }
            for warning in &outcome.warnings {
                report.warnings += 1;
                warn!(row, %warning, "Row warning");
            }

            checkpoint.advance();
        }

        session.close()
    }

    /// Extract up to `limit` records starting at `from_row` without touching
    /// any checkpoint. Stops early at the first empty record or the last row.
    pub fn preview(&self, database: &Path, from_row: usize, limit: usize) -> Result<Vec<(usize, Record)>> {
        if from_row == 0 {
            return Err(RecruitError::InvalidRowNumber);
        }

        let mut source = TabularSource::new(self.has_header);
        let session = source.open_scoped(database, self.sheet_index)?;

        let last_row = session.row_count()?;
        let mut records = Vec::new();
        for row in (from_row..=last_row).take(limit) {
            let record = self.extractor.extract(&session.read_row(row)?)?;
            if record.is_empty() {
                break;
            }
            records.push((row, record));
        }

        session.close()?;
        Ok(records)
    }
}
