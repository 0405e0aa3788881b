use crate::types::CellKind;
use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Worksheet index {index} is out of range (workbook has {count} worksheets)")]
    WorksheetIndex { index: usize, count: usize },

    #[error("Type conversion error at row {row}, column {column} ({field}): {source}")]
    TypeConversion {
        row: u32,
        column: u32,
        field: &'static str,
        source: ConversionError,
    },

    #[error("Cell at row {row}, column {column} is outside the worksheet grid")]
    OutOfBounds { row: u64, column: u64 },

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Failure to coerce a cell value into a field's declared type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("cannot convert {found} to {expected}")]
    Incompatible { expected: CellKind, found: String },

    #[error("value {value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error("record has no column at ordinal {0}")]
    UnknownOrdinal(usize),
}

impl ConversionError {
    pub(crate) fn incompatible(expected: CellKind, found: impl std::fmt::Display) -> Self {
        ConversionError::Incompatible {
            expected,
            found: found.to_string(),
        }
    }
}
