//! Field parsers
//!
//! A field parser turns one raw cell into zero or more named values. Failing
//! to find a value is the normal `Ok(None)` result; parsers never fail on
//! malformed input. `Err(FieldFault)` is reserved for internal faults such as
//! a digit run that does not fit in an `i64`.

use crate::cell::Cell;
use recruit_common::normalize::normalize;
use recruit_common::{Record, Value};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

/// Keys produced by the standard candidate layout
pub mod keys {
    pub const VACANCY: &str = "vacancy";
    pub const LAST_NAME: &str = "last_name";
    pub const FIRST_NAME: &str = "first_name";
    pub const MIDDLE_NAME: &str = "middle_name";
    pub const MONEY: &str = "money";
    pub const COMMENT: &str = "comment";
    pub const STATUS: &str = "status";
}

/// Default currency label appended to salaries
pub const DEFAULT_CURRENCY: &str = "руб";

/// One or more digit groups separated by whitespace, e.g. "1 200 000".
/// `\d` matches any Unicode decimal digit, not only ASCII.
#[allow(clippy::expect_used)]
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\s+\d+)*").expect("digit run pattern compiles"));

#[allow(clippy::expect_used)]
static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("decimal digit pattern compiles"));

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of a decimal digit in any script.
///
/// Unicode assigns decimal digits only in contiguous blocks of ten starting
/// at zero, so the value is the offset from the start of the run, mod 10.
fn decimal_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut start = u32::from(c);
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    Some((u32::from(c) - start) % 10)
}

/// Internal parser fault (never raised for merely malformed input)
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct FieldFault {
    pub reason: String,
}

/// Extracts named values from a single cell
pub trait FieldParser: fmt::Debug + Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Every key this parser may emit
    fn keys(&self) -> Vec<&str>;

    /// Parse one cell. A returned record is never empty.
    fn parse(&self, cell: &Cell) -> Result<Option<Record>, FieldFault>;
}

fn single(key: &str, value: impl Into<Value>) -> Record {
    let mut record = Record::new();
    record.insert(key, value);
    record
}

/// Normalized cell text, `None` only for an empty cell. Whitespace is kept.
fn normalized_text(cell: &Cell) -> Option<String> {
    let text = normalize(&cell.to_text()?);
    (!text.is_empty()).then_some(text)
}

/// Plain text field
#[derive(Debug, Clone)]
pub struct TextField {
    name: String,
}

impl TextField {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl FieldParser for TextField {
    fn name(&self) -> &str {
        &self.name
    }

    fn keys(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn parse(&self, cell: &Cell) -> Result<Option<Record>, FieldFault> {
        Ok(normalized_text(cell).map(|text| single(&self.name, text)))
    }
}

/// Integer written with optional whitespace between digit groups
/// ("120 000" -> 120000). The first such run in the cell wins.
#[derive(Debug, Clone)]
pub struct DelimitedIntegerField {
    name: String,
}

impl DelimitedIntegerField {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The integer value of the first digit run, if any
    pub fn extract(&self, cell: &Cell) -> Result<Option<i64>, FieldFault> {
        let Some(text) = cell.to_text() else {
            return Ok(None);
        };
        let text = normalize(&text);

        let Some(run) = DIGIT_RUN.find(&text) else {
            return Ok(None);
        };

        let mut value: i64 = 0;
        for digit in run.as_str().chars().filter_map(decimal_value) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(digit)))
                .ok_or_else(|| FieldFault {
                    reason: format!("digit run '{}' does not fit in a 64-bit integer", run.as_str()),
                })?;
        }
        Ok(Some(value))
    }
}

impl FieldParser for DelimitedIntegerField {
    fn name(&self) -> &str {
        &self.name
    }

    fn keys(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn parse(&self, cell: &Cell) -> Result<Option<Record>, FieldFault> {
        Ok(self.extract(cell)?.map(|n| single(&self.name, n)))
    }
}

/// Salary: a delimited integer followed by a currency label ("120000 руб")
#[derive(Debug, Clone)]
pub struct SalaryField {
    amount: DelimitedIntegerField,
    currency: String,
}

impl SalaryField {
    pub fn new(name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            amount: DelimitedIntegerField::new(name),
            currency: currency.into(),
        }
    }
}

impl FieldParser for SalaryField {
    fn name(&self) -> &str {
        self.amount.name()
    }

    fn keys(&self) -> Vec<&str> {
        self.amount.keys()
    }

    fn parse(&self, cell: &Cell) -> Result<Option<Record>, FieldFault> {
        Ok(self
            .amount
            .extract(cell)?
            .map(|n| single(self.name(), format!("{} {}", n, self.currency))))
    }
}

/// Recruitment stage labels known to the spreadsheet producers.
///
/// The labels are only lookup keys for the remote status dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    NewLead,
    Submitted,
    Contacted,
    HrInterview,
    ClientInterview,
    Offered,
    OfferAccepted,
    Hired,
    TrialPassed,
    Declined,
}

impl StatusLabel {
    pub const ALL: [StatusLabel; 10] = [
        StatusLabel::NewLead,
        StatusLabel::Submitted,
        StatusLabel::Contacted,
        StatusLabel::HrInterview,
        StatusLabel::ClientInterview,
        StatusLabel::Offered,
        StatusLabel::OfferAccepted,
        StatusLabel::Hired,
        StatusLabel::TrialPassed,
        StatusLabel::Declined,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusLabel::NewLead => "New Lead",
            StatusLabel::Submitted => "Submitted",
            StatusLabel::Contacted => "Contacted",
            StatusLabel::HrInterview => "HR Interview",
            StatusLabel::ClientInterview => "Client Interview",
            StatusLabel::Offered => "Offered",
            StatusLabel::OfferAccepted => "Offer Accepted",
            StatusLabel::Hired => "Hired",
            StatusLabel::TrialPassed => "Trial passed",
            StatusLabel::Declined => "Declined",
        }
    }

    /// Exact (post-normalization) match against the known labels
    pub fn recognize(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == text)
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recruitment stage, kept as normalized text
#[derive(Debug, Clone)]
pub struct StatusField {
    inner: TextField,
}

impl StatusField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: TextField::new(name),
        }
    }
}

impl FieldParser for StatusField {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn keys(&self) -> Vec<&str> {
        self.inner.keys()
    }

    fn parse(&self, cell: &Cell) -> Result<Option<Record>, FieldFault> {
        let record = self.inner.parse(cell)?;
        if let Some(text) = record.as_ref().and_then(|r| r.get_str(self.name())) {
            if StatusLabel::recognize(text.trim()).is_none() {
                debug!(status = text, "Not a standard status label");
            }
        }
        Ok(record)
    }
}

/// "Last First [Middle]" split into `last_name`, `first_name` and, when
/// present, `middle_name`. Fewer than two tokens yields nothing; tokens past
/// the third are ignored.
#[derive(Debug, Clone)]
pub struct FullNameField {
    name: String,
}

impl FullNameField {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl FieldParser for FullNameField {
    fn name(&self) -> &str {
        &self.name
    }

    fn keys(&self) -> Vec<&str> {
        vec![keys::LAST_NAME, keys::FIRST_NAME, keys::MIDDLE_NAME]
    }

    fn parse(&self, cell: &Cell) -> Result<Option<Record>, FieldFault> {
        let Some(text) = cell.to_text() else {
            return Ok(None);
        };
        let text = normalize(&text);
        let tokens: Vec<&str> = text.split_whitespace().take(3).collect();

        let (last, first) = match tokens.as_slice() {
            [last, first, ..] => (*last, *first),
            _ => return Ok(None),
        };

        let mut record = Record::new();
        record.insert(keys::LAST_NAME, last);
        record.insert(keys::FIRST_NAME, first);
        if let Some(middle) = tokens.get(2) {
            record.insert(keys::MIDDLE_NAME, *middle);
        }
        Ok(Some(record))
    }
}

/// The standard column layout: vacancy, full name, salary, comment, status.
///
/// Columns are positional; reordering the spreadsheet without changing this
/// list silently puts values under the wrong keys.
pub fn candidate_fields(currency: &str) -> Vec<Box<dyn FieldParser>> {
    vec![
        Box::new(TextField::new(keys::VACANCY)),
        Box::new(FullNameField::new("full name")),
        Box::new(SalaryField::new(keys::MONEY, currency)),
        Box::new(TextField::new(keys::COMMENT)),
        Box::new(StatusField::new(keys::STATUS)),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(parser: &dyn FieldParser, cell: impl Into<Cell>) -> Option<Record> {
        parser.parse(&cell.into()).unwrap()
    }

    #[test]
    fn test_text_field() {
        let field = TextField::new("comment");
        let record = parse(&field, "ok").unwrap();
        assert_eq!(record.get_str("comment"), Some("ok"));
        assert_eq!(record.len(), 1);

        assert!(parse(&field, "").is_none());
        assert!(field.parse(&Cell::Empty).unwrap().is_none());
    }

    #[test]
    fn test_text_field_keeps_whitespace() {
        let field = TextField::new("comment");
        assert_eq!(parse(&field, "   ").unwrap().get_str("comment"), Some("   "));
        assert_eq!(parse(&field, " ok ").unwrap().get_str("comment"), Some(" ok "));
    }

    #[test]
    fn test_text_field_normalizes_and_coerces_numbers() {
        let field = TextField::new("vacancy");
        assert_eq!(parse(&field, "Ｄｅｖ").unwrap().get_str("vacancy"), Some("Dev"));
        assert_eq!(parse(&field, 42i64).unwrap().get_str("vacancy"), Some("42"));
    }

    #[test]
    fn test_delimited_integer() {
        let field = DelimitedIntegerField::new("n");
        assert_eq!(field.extract(&"120 000".into()).unwrap(), Some(120000));
        assert_eq!(field.extract(&"1 200 000".into()).unwrap(), Some(1_200_000));
        assert_eq!(field.extract(&"from 90\u{00A0}000 net".into()).unwrap(), Some(90000));
        assert_eq!(field.extract(&"42".into()).unwrap(), Some(42));
        assert_eq!(field.extract(&Cell::Integer(150000)).unwrap(), Some(150000));
        assert_eq!(field.extract(&"no numbers here".into()).unwrap(), None);
        assert_eq!(field.extract(&Cell::Empty).unwrap(), None);
    }

    #[test]
    fn test_delimited_integer_takes_first_run() {
        let field = DelimitedIntegerField::new("n");
        assert_eq!(field.extract(&"100 000 - 150 000".into()).unwrap(), Some(100000));
        assert_eq!(field.extract(&"5 years, 300k".into()).unwrap(), Some(5));
    }

    #[test]
    fn test_delimited_integer_other_scripts() {
        let field = DelimitedIntegerField::new("n");
        // Arabic-Indic and Devanagari digits survive NFKC unchanged
        assert_eq!(field.extract(&"٣٠٠ ٠٠٠".into()).unwrap(), Some(300000));
        assert_eq!(field.extract(&"१२० ०००".into()).unwrap(), Some(120000));
        assert_eq!(field.extract(&"Ｌ 90 000".into()).unwrap(), Some(90000));
    }

    #[test]
    fn test_decimal_value() {
        assert_eq!(decimal_value('7'), Some(7));
        assert_eq!(decimal_value('\u{0660}'), Some(0));
        assert_eq!(decimal_value('\u{0669}'), Some(9));
        assert_eq!(decimal_value('\u{09EB}'), Some(5));
        assert_eq!(decimal_value('x'), None);
        assert_eq!(decimal_value(' '), None);
    }

    #[test]
    fn test_delimited_integer_overflow_is_a_fault() {
        let field = DelimitedIntegerField::new("n");
        let result = field.extract(&"99999999999999999999999".into());
        assert!(result.is_err());
    }

    #[test]
    fn test_salary() {
        let field = SalaryField::new("money", "руб");
        let record = parse(&field, "120 000").unwrap();
        assert_eq!(record.get_str("money"), Some("120000 руб"));
        assert!(parse(&field, "").is_none());
        assert!(parse(&field, "negotiable").is_none());
    }

    #[test]
    fn test_full_name_three_parts() {
        let field = FullNameField::new("full name");
        let record = parse(&field, "Ivanov Ivan Ivanovich").unwrap();
        assert_eq!(record.get_str("last_name"), Some("Ivanov"));
        assert_eq!(record.get_str("first_name"), Some("Ivan"));
        assert_eq!(record.get_str("middle_name"), Some("Ivanovich"));
    }

    #[test]
    fn test_full_name_two_parts_has_no_middle_name() {
        let field = FullNameField::new("full name");
        let record = parse(&field, "Ivanov Ivan").unwrap();
        assert_eq!(record.len(), 2);
        assert!(!record.contains_key("middle_name"));
    }

    #[test]
    fn test_full_name_rejects_single_token_and_ignores_surplus() {
        let field = FullNameField::new("full name");
        assert!(parse(&field, "Ivanov").is_none());
        assert!(parse(&field, "").is_none());

        let record = parse(&field, "Ivanov  Ivan Ivanovich Jr").unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.get_str("first_name"), Some("Ivan"));
        assert_eq!(record.get_str("middle_name"), Some("Ivanovich"));
    }

    #[test]
    fn test_status_field_keeps_text() {
        let field = StatusField::new("status");
        assert_eq!(parse(&field, "New Lead").unwrap().get_str("status"), Some("New Lead"));
        assert_eq!(parse(&field, "On hold").unwrap().get_str("status"), Some("On hold"));
        assert_eq!(parse(&field, " Hired ").unwrap().get_str("status"), Some(" Hired "));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(StatusLabel::recognize("Trial passed"), Some(StatusLabel::TrialPassed));
        assert_eq!(StatusLabel::recognize("trial passed"), None);
        assert_eq!(StatusLabel::HrInterview.to_string(), "HR Interview");
        assert_eq!(StatusLabel::ALL.len(), 10);
    }

    #[test]
    fn test_candidate_layout_keys() {
        let fields = candidate_fields(DEFAULT_CURRENCY);
        let keys: Vec<&str> = fields.iter().flat_map(|f| f.keys()).collect();
        assert_eq!(
            keys,
            vec!["vacancy", "last_name", "first_name", "middle_name", "money", "comment", "status"]
        );
    }

    proptest! {
        #[test]
        fn prop_delimited_integer_ignores_interior_whitespace(
            groups in prop::collection::vec(0u32..1000, 1..5),
            gaps in prop::collection::vec("[ \t]{1,3}", 4),
        ) {
            let mut text = String::from("about ");
            let mut digits = String::new();
            for (i, group) in groups.iter().enumerate() {
                if i > 0 {
                    text.push_str(&gaps[i - 1]);
                }
                text.push_str(&group.to_string());
                digits.push_str(&group.to_string());
            }
            text.push_str(" rub");

            let field = DelimitedIntegerField::new("n");
            let expected: i64 = digits.parse().unwrap();
            prop_assert_eq!(field.extract(&Cell::from(text)).unwrap(), Some(expected));
        }
    }
}
