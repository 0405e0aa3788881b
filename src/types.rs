use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

//==============================================================================
// Declared field types
//==============================================================================

/// The declared type of a record field, used to coerce cell values on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
}

impl CellKind {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            CellKind::Text => "Text",
            CellKind::Integer => "Integer",
            CellKind::Float => "Float",
            CellKind::Boolean => "Boolean",
            CellKind::Date => "Date",
            CellKind::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

//==============================================================================
// Column descriptors
//==============================================================================

/// One mapped field of a record type. The ordinal is the position of the
/// descriptor in [`crate::Record::COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Header text written by the plain writer
    pub name: &'static str,
    pub kind: CellKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: CellKind) -> Self {
        Self { name, kind }
    }
}

//==============================================================================
// Cell values
//==============================================================================

/// A single cell value as exchanged between records and the spreadsheet backends.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest integer magnitude a numeric cell (an `f64`) stores exactly.
pub(crate) const MAX_EXACT_INTEGER: u64 = 1 << 53;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

impl CellValue {
    /// True when the cell has no textual content (no value or an empty string).
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Text representation used by the template writer and for text fields.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Short description for error messages, e.g. `Text("abc")`.
    pub(crate) fn describe(&self) -> String {
        match self {
            CellValue::Empty => "Empty".to_string(),
            CellValue::Text(s) => format!("Text({:?})", s),
            CellValue::Int(i) => format!("Int({})", i),
            CellValue::Number(n) => format!("Number({})", n),
            CellValue::Bool(b) => format!("Bool({})", b),
            CellValue::Date(d) => format!("Date({})", d.format(DATE_FORMAT)),
            CellValue::DateTime(dt) => format!("DateTime({})", dt.format(DATETIME_FORMAT)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

//==============================================================================
// Excel date serials (1900 date system)
//==============================================================================

fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert a datetime to an Excel serial number (days since 1899-12-30).
pub fn datetime_to_serial(datetime: &NaiveDateTime) -> f64 {
    (*datetime - excel_epoch()).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Convert an Excel serial number back to a datetime, rounded to the millisecond.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let millis = (serial * MILLIS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    excel_epoch().checked_add_signed(delta)
}
