//! Tabular source
//!
//! Row-indexed access to one sheet of a workbook (via calamine) or a
//! delimited text file (via csv). The source moves between two states,
//! closed and open; reads are only valid while open.
//!
//! Row numbers are 1-based and data-relative: with a header row configured,
//! row 1 is the first row after the header.

use crate::cell::Cell;
use calamine::{open_workbook_auto, Reader};
use recruit_common::{RecruitError, Result};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Raw cells of one data row.
///
/// A row past the end of the sheet carries no cells; extracting it yields
/// an empty record.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    number: usize,
    cells: Option<Vec<Cell>>,
}

impl Row {
    pub fn new(number: usize, cells: Vec<Cell>) -> Self {
        Self {
            number,
            cells: Some(cells),
        }
    }

    pub fn past_end(number: usize) -> Self {
        Self {
            number,
            cells: None,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn cells(&self) -> Option<&[Cell]> {
        self.cells.as_deref()
    }
}

/// One loaded sheet, rectangular: every row has `width` cells
#[derive(Debug)]
struct Sheet {
    path: PathBuf,
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Sheet {
    fn load(path: &Path, sheet_index: usize) -> Result<Self> {
        if !path.is_file() {
            return Err(RecruitError::source_open(path, "file does not exist"));
        }

        let rows = match extension(path).as_deref() {
            Some("csv") => load_delimited(path, b',')?,
            Some("tsv") => load_delimited(path, b'\t')?,
            _ => load_workbook(path, sheet_index)?,
        };

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            rows,
            width,
        })
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn load_workbook(path: &Path, sheet_index: usize) -> Result<Vec<Vec<Cell>>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| RecruitError::source_open(path, e))?;

    let range = workbook
        .worksheet_range_at(sheet_index)
        .ok_or_else(|| {
            RecruitError::source_open(path, format!("workbook has no sheet at index {}", sheet_index))
        })?
        .map_err(|e| RecruitError::source_open(path, e))?;

    // Absolute coordinates so leading blank rows keep their row numbers
    let Some((last_row, last_col)) = range.end() else {
        return Ok(Vec::new());
    };

    let rows = (0..=last_row)
        .map(|r| {
            (0..=last_col)
                .map(|c| range.get_value((r, c)).map(Cell::from).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(rows)
}

fn load_delimited(path: &Path, delimiter: u8) -> Result<Vec<Vec<Cell>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| RecruitError::source_open(path, e))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| RecruitError::source_open(path, e))?;
        rows.push(record.iter().map(Cell::from).collect());
    }
    Ok(rows)
}

/// Spreadsheet reader with an explicit open/close lifecycle
#[derive(Debug)]
pub struct TabularSource {
    has_header: bool,
    sheet: Option<Sheet>,
}

impl TabularSource {
    pub fn new(has_header: bool) -> Self {
        Self {
            has_header,
            sheet: None,
        }
    }

    /// Load the sheet at `sheet_index`. An already open source is closed first.
    pub fn open(&mut self, path: impl AsRef<Path>, sheet_index: usize) -> Result<()> {
        if self.is_open() {
            self.close()?;
        }

        let path = path.as_ref();
        let sheet = Sheet::load(path, sheet_index)?;
        debug!(
            path = %path.display(),
            sheet = sheet_index,
            rows = sheet.rows.len(),
            width = sheet.width,
            "Opened source"
        );
        self.sheet = Some(sheet);
        Ok(())
    }

    /// Open and return a guard that closes the source when dropped
    pub fn open_scoped(
        &mut self,
        path: impl AsRef<Path>,
        sheet_index: usize,
    ) -> Result<SourceSession<'_>> {
        self.open(path, sheet_index)?;
        Ok(SourceSession { source: self })
    }

    /// Raw cells of data row `number` (1-based)
    pub fn read_row(&self, number: usize) -> Result<Row> {
        let sheet = self.sheet.as_ref().ok_or(RecruitError::SourceNotOpen)?;
        if number == 0 {
            return Err(RecruitError::InvalidRowNumber);
        }

        let index = number - 1 + usize::from(self.has_header);
        Ok(match sheet.rows.get(index) {
            Some(cells) => Row::new(number, cells.clone()),
            None => Row::past_end(number),
        })
    }

    pub fn close(&mut self) -> Result<()> {
        let sheet = self.sheet.take().ok_or(RecruitError::SourceNotOpen)?;
        debug!(path = %sheet.path.display(), "Closed source");
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.sheet.is_some()
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> Result<usize> {
        let sheet = self.sheet.as_ref().ok_or(RecruitError::SourceNotOpen)?;
        Ok(sheet.rows.len().saturating_sub(usize::from(self.has_header)))
    }
}

/// An open [`TabularSource`] that is closed on every exit path
#[derive(Debug)]
pub struct SourceSession<'a> {
    source: &'a mut TabularSource,
}

impl SourceSession<'_> {
    /// Close now and report the result instead of closing silently on drop
    pub fn close(self) -> Result<()> {
        self.source.close()
    }
}

impl Deref for SourceSession<'_> {
    type Target = TabularSource;

    fn deref(&self) -> &Self::Target {
        self.source
    }
}

impl DerefMut for SourceSession<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.source
    }
}

impl Drop for SourceSession<'_> {
    fn drop(&mut self) {
        if self.source.is_open() {
            if let Err(e) = self.source.close() {
                warn!(error = %e, "Failed to close source");
            }
        }
    }
}
