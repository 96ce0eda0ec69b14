//! Recruit Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Turns spreadsheet rows describing job candidates into [`Record`]s and feeds
//! them, resumably, to a [`Submitter`].
//!
//! # Overview
//!
//! - [`field`]: cell-level parsers (text, delimited integer, salary, status, full name)
//! - [`extractor`]: applies an ordered parser list to one row
//! - [`source`]: workbook / CSV reader with an open/close lifecycle
//! - [`checkpoint`]: the persisted "next row" cursor
//! - [`pipeline`]: the ingestion loop and the submitter seam
//!
//! # Example
//!
//! ```no_run
//! use recruit_common::Record;
//! use recruit_ingest::{candidate_fields, Checkpoint, Ingestor, RowExtractor, SubmitOutcome};
//! use std::path::Path;
//!
//! # fn main() -> recruit_common::Result<()> {
//! let database = Path::new("candidates.xlsx");
//! let extractor = RowExtractor::new(candidate_fields("руб"))?;
//! let ingestor = Ingestor::new(extractor);
//!
//! let report = ingestor.run(
//!     database,
//!     &Checkpoint::path_for(database),
//!     &mut |row: usize, record: &Record| -> anyhow::Result<SubmitOutcome> {
//!         println!("{row}: {}", record.len());
//!         Ok(SubmitOutcome::default())
//!     },
//! )?;
//! println!("next row: {}", report.next_row);
//! # Ok(())
//! # }
//! ```
//!
//! [`Record`]: recruit_common::Record

pub mod cell;
pub mod checkpoint;
pub mod extractor;
pub mod field;
pub mod pipeline;
pub mod source;

pub use cell::Cell;
pub use checkpoint::Checkpoint;
pub use extractor::RowExtractor;
pub use field::{candidate_fields, keys, FieldFault, FieldParser, StatusLabel, DEFAULT_CURRENCY};
pub use pipeline::{DryRunSubmitter, IngestReport, Ingestor, RowWarning, SubmitOutcome, Submitter};
pub use source::{Row, SourceSession, TabularSource};
