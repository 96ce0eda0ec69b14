//! Row extraction
//!
//! Parser `i` reads cell `i`. Outputs are merged in parser order into one
//! [`Record`]; an all-null row yields an empty record, which callers treat as
//! end of data.

use crate::field::FieldParser;
use crate::source::Row;
use recruit_common::{Record, RecruitError, Result};
use std::collections::HashSet;
use tracing::trace;

/// Applies an ordered list of field parsers to one row at a time
#[derive(Debug)]
pub struct RowExtractor {
    parsers: Vec<Box<dyn FieldParser>>,
}

impl RowExtractor {
    /// Build an extractor. Fails with [`RecruitError::DuplicateField`] when two
    /// parsers declare the same output key, so the merge never overwrites.
    pub fn new(parsers: Vec<Box<dyn FieldParser>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for parser in &parsers {
            for key in parser.keys() {
                if !seen.insert(key) {
                    return Err(RecruitError::DuplicateField {
                        key: key.to_string(),
                    });
                }
            }
        }
        Ok(Self { parsers })
    }

    /// Extract one row. Rows past the end of the source produce an empty
    /// record; data rows narrower than the parser list are an error.
    pub fn extract(&self, row: &Row) -> Result<Record> {
        let mut record = Record::new();

        let Some(cells) = row.cells() else {
            return Ok(record);
        };

        if cells.len() < self.parsers.len() {
            return Err(RecruitError::RowTooShort {
                row: row.number(),
                cells: cells.len(),
                expected: self.parsers.len(),
            });
        }

        for (parser, cell) in self.parsers.iter().zip(cells) {
            let contribution = parser.parse(cell).map_err(|fault| RecruitError::FieldFault {
                field: parser.name().to_string(),
                reason: fault.reason,
            })?;

            match contribution {
                Some(fields) => {
                    for (key, value) in fields {
                        record.insert(key, value);
                    }
                }
                None => trace!(row = row.number(), field = parser.name(), "No value"),
            }
        }

        Ok(record)
    }
}
