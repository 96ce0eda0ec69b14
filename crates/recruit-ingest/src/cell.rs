//! Raw spreadsheet cell values

use calamine::Data;
use std::borrow::Cow;

/// One raw cell as read from the source, before any field parsing
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    /// Coerce the cell to text. Numbers render without a trailing `.0` when
    /// they are whole. `None` only for an empty cell.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(Cow::Borrowed(s)),
            Cell::Integer(n) => Some(Cow::Owned(n.to_string())),
            Cell::Float(f) => Some(Cow::Owned(f.to_string())),
            Cell::Bool(b) => Some(Cow::Owned(b.to_string())),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s)
        }
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Integer(n)
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Cell::Float(f)
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) => Cell::from(s.as_str()),
            Data::Int(n) => Cell::Integer(*n),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from(s.as_str()),
            other => Cell::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_coercion() {
        assert_eq!(Cell::Empty.to_text(), None);
        assert_eq!(Cell::from("Dev").to_text().as_deref(), Some("Dev"));
        assert_eq!(Cell::Integer(120000).to_text().as_deref(), Some("120000"));
        assert_eq!(Cell::Float(120000.0).to_text().as_deref(), Some("120000"));
        assert_eq!(Cell::Float(1.5).to_text().as_deref(), Some("1.5"));
    }

    #[test]
    fn test_empty_string_is_empty_cell() {
        assert_eq!(Cell::from(""), Cell::Empty);
        assert_eq!(Cell::from(String::new()), Cell::Empty);
        assert_eq!(Cell::from(" "), Cell::Text(" ".into()));
    }

    #[test]
    fn test_from_workbook_data() {
        assert_eq!(Cell::from(&Data::Int(7)), Cell::Integer(7));
        assert_eq!(Cell::from(&Data::String("ok".into())), Cell::Text("ok".into()));
        assert_eq!(Cell::from(&Data::Empty), Cell::Empty);
    }
}
