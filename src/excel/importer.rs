//! Record reader: .xlsx worksheet rows → records

use crate::config::ReadOptions;
use crate::error::{SheetError, SheetResult};
use crate::excel::address::MAX_ROWS;
use crate::record::Record;
use crate::types::{serial_to_datetime, CellValue};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads rows of a worksheet into records until the first blank row.
pub struct RecordImporter {
    path: PathBuf,
    options: ReadOptions,
}

impl RecordImporter {
    /// Create a new importer for the workbook at `path`
    pub fn new<P: AsRef<Path>>(path: P, options: ReadOptions) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options,
        }
    }

    /// Import records from the selected worksheet
    pub fn import<T: Record>(&self) -> SheetResult<Vec<T>> {
        self.options.validate()?;

        // Surface a missing or unreadable file as an IO error
        std::fs::metadata(&self.path)?;

        info!(
            path = %self.path.display(),
            worksheet = self.options.worksheet_index,
            starting_row = self.options.starting_row,
            "reading records"
        );

        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e: calamine::XlsxError| {
            SheetError::Spreadsheet(format!("Failed to open Excel file: {}", e))
        })?;

        let count = workbook.sheet_names().len();
        let range = workbook
            .worksheet_range_at(self.options.worksheet_index)
            .ok_or(SheetError::WorksheetIndex {
                index: self.options.worksheet_index,
                count,
            })?
            .map_err(|e| SheetError::Spreadsheet(format!("Failed to read worksheet: {}", e)))?;

        let records = self.scan_rows(&range)?;
        debug!(records = records.len(), "reached blank row");
        Ok(records)
    }

    /// Scan from the starting row; the first row without any non-empty mapped
    /// cell ends the scan and is not emitted.
    fn scan_rows<T: Record>(&self, range: &Range<Data>) -> SheetResult<Vec<T>> {
        let mut records = Vec::new();
        let mut row = self.options.starting_row;

        while row <= MAX_ROWS {
            match read_record::<T>(range, row)? {
                Some(record) => records.push(record),
                None => break,
            }
            row += 1;
        }

        Ok(records)
    }
}

/// Read one worksheet row (1-based) into a record. Returns `None` when none of
/// the mapped cells has a value.
pub(crate) fn read_record<T: Record>(range: &Range<Data>, row: u32) -> SheetResult<Option<T>> {
    let mut record = T::default();
    let mut any_value = false;

    for (ordinal, column) in T::COLUMNS.iter().enumerate() {
        let col = ordinal as u32 + 1;
        let value = range
            .get_value((row - 1, col - 1))
            .map(cell_value_from_data)
            .unwrap_or_default();

        if value.is_empty() {
            continue;
        }

        record
            .set_field(ordinal, &value)
            .map_err(|source| SheetError::TypeConversion {
                row,
                column: col,
                field: column.name,
                source,
            })?;
        any_value = true;
    }

    Ok(any_value.then_some(record))
}

/// Convert a calamine cell into a [`CellValue`]
pub(crate) fn cell_value_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match serial_to_datetime(dt.as_f64()) {
            Some(datetime) => CellValue::DateTime(datetime),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(CellValue::DateTime)
            .unwrap_or_else(|_| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
