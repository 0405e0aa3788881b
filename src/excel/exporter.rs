//! Plain record writer: records → fresh .xlsx workbook

use crate::config::WriteOptions;
use crate::error::{SheetError, SheetResult};
use crate::excel::address::{MAX_COLUMNS, MAX_ROWS};
use crate::record::Record;
use crate::types::{datetime_to_serial, CellValue, MAX_EXACT_INTEGER};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::{debug, info};

/// Writes a slice of records to a new workbook with a single worksheet.
///
/// The optional header row holds the column names; data starts on the row
/// after it (or on row 1 without headers), always in column A.
pub struct RecordExporter<'a, T: Record> {
    records: &'a [T],
    options: WriteOptions,
    date_format: Format,
    datetime_format: Format,
}

impl<'a, T: Record> RecordExporter<'a, T> {
    /// Create a new exporter for `records`
    pub fn new(records: &'a [T], options: WriteOptions) -> Self {
        Self {
            records,
            options,
            date_format: Format::new().set_num_format("yyyy-mm-dd"),
            datetime_format: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
        }
    }

    /// Export the records to an .xlsx file, creating or overwriting it
    pub fn export(&self, output_path: &Path) -> SheetResult<()> {
        self.options.validate()?;
        self.check_bounds()?;

        info!(
            path = %output_path.display(),
            records = self.records.len(),
            sheet = %self.options.sheet_name,
            "writing records"
        );

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&self.options.sheet_name)
            .map_err(|e| spreadsheet_error("Failed to set worksheet name", e))?;

        let mut row: u32 = 0;
        if self.options.print_headers {
            for (col_idx, column) in T::COLUMNS.iter().enumerate() {
                worksheet
                    .write_string(row, col_idx as u16, column.name)
                    .map_err(|e| spreadsheet_error("Failed to write header", e))?;
            }
            row += 1;
        }

        for record in self.records {
            for (col_idx, value) in record.to_row().iter().enumerate() {
                self.write_cell_value(worksheet, row, col_idx as u16, value)?;
            }
            row += 1;
        }

        if self.options.autofit {
            worksheet.autofit();
        }

        super::ensure_writable(output_path)?;
        workbook
            .save(output_path)
            .map_err(|e| save_error(output_path, e))?;

        debug!(path = %output_path.display(), rows = row, "workbook saved");
        Ok(())
    }

    fn check_bounds(&self) -> SheetResult<()> {
        let columns = T::COLUMNS.len() as u64;
        if columns > MAX_COLUMNS as u64 {
            return Err(SheetError::OutOfBounds {
                row: 1,
                column: columns,
            });
        }
        let rows = self.records.len() as u64 + u64::from(self.options.print_headers);
        if rows > MAX_ROWS as u64 {
            return Err(SheetError::OutOfBounds {
                row: rows,
                column: 1,
            });
        }
        Ok(())
    }

    /// Write a single cell, keeping the value's type. Empty values leave the cell blank.
    /// Integers beyond 2^53 are written as text.
    fn write_cell_value(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
    ) -> SheetResult<()> {
        let result = match value {
            CellValue::Empty => return Ok(()),
            CellValue::Text(text) => worksheet.write_string(row, col, text),
            CellValue::Int(i) if i.unsigned_abs() <= MAX_EXACT_INTEGER => {
                worksheet.write_number(row, col, *i as f64)
            }
            // Too wide for a numeric cell; text keeps every digit
            CellValue::Int(i) => worksheet.write_string(row, col, i.to_string()),
            CellValue::Number(n) => worksheet.write_number(row, col, *n),
            CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
            CellValue::Date(date) => {
                let serial = date
                    .and_hms_opt(0, 0, 0)
                    .map(|dt| datetime_to_serial(&dt))
                    .unwrap_or_default();
                worksheet.write_number_with_format(row, col, serial, &self.date_format)
            }
            CellValue::DateTime(dt) => worksheet.write_number_with_format(
                row,
                col,
                datetime_to_serial(dt),
                &self.datetime_format,
            ),
        };
        result.map_err(|e| spreadsheet_error("Failed to write cell", e))?;
        Ok(())
    }
}

fn spreadsheet_error(context: &str, e: XlsxError) -> SheetError {
    SheetError::Spreadsheet(format!("{}: {}", context, e))
}

fn save_error(path: &Path, e: XlsxError) -> SheetError {
    match e {
        XlsxError::IoError(io) => SheetError::Io(io),
        other => SheetError::Spreadsheet(format!(
            "Failed to save Excel file {}: {}",
            path.display(),
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet_record;
    use tempfile::TempDir;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Row {
        label: String,
        amount: f64,
    }

    sheet_record! {
        Row {
            label: String => "Label",
            amount: f64 => "Amount",
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                label: "a".to_string(),
                amount: 1.5,
            },
            Row {
                label: "b".to_string(),
                amount: 2.0,
            },
        ]
    }

    #[test]
    fn test_export_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("rows.xlsx");

        let records = rows();
        let exporter = RecordExporter::new(&records, WriteOptions::default());
        exporter.export(&output_path).unwrap();

        assert!(output_path.exists(), "Output file should exist");
    }

    #[test]
    fn test_export_empty_records() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("empty.xlsx");

        let records: Vec<Row> = Vec::new();
        let exporter = RecordExporter::new(&records, WriteOptions::default());
        assert!(exporter.export(&output_path).is_ok());
        assert!(output_path.exists());
    }

    #[test]
    fn test_export_rejects_invalid_sheet_name() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("bad.xlsx");

        let records = rows();
        let exporter = RecordExporter::new(&records, WriteOptions::new().sheet_name("a:b"));
        let result = exporter.export(&output_path);

        assert!(matches!(result, Err(SheetError::Validation(_))));
        assert!(!output_path.exists());
    }

    #[test]
    fn test_export_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("missing").join("rows.xlsx");

        let records = rows();
        let exporter = RecordExporter::new(&records, WriteOptions::default());
        let result = exporter.export(&output_path);

        assert!(matches!(result, Err(SheetError::Io(_))));
    }
}
