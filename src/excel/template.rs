//! Template record writer: template .xlsx + records → styled .xlsx

use crate::config::TemplateOptions;
use crate::error::{SheetError, SheetResult};
use crate::excel::address::{cell_address, MAX_COLUMNS, MAX_ROWS};
use crate::record::Record;
use crate::types::{CellValue, MAX_EXACT_INTEGER};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use umya_spreadsheet::{Cell, Spreadsheet, Style, Worksheet};

/// Writes records into a copy of a template workbook.
///
/// Each written cell takes the style of the template-row cell in its column,
/// so a single formatted row in the template styles every data row.
pub struct TemplateExporter<'a, T: Record> {
    template_path: PathBuf,
    records: &'a [T],
    options: TemplateOptions,
}

impl<'a, T: Record> TemplateExporter<'a, T> {
    pub fn new<P: AsRef<Path>>(template_path: P, records: &'a [T], options: TemplateOptions) -> Self {
        Self {
            template_path: template_path.as_ref().to_path_buf(),
            records,
            options,
        }
    }

    /// Fill the template and save the result to `output_path`. The template file is not modified.
    pub fn export(&self, output_path: &Path) -> SheetResult<()> {
        self.options.validate()?;
        self.check_bounds()?;

        // Surface a missing template as an IO error
        std::fs::metadata(&self.template_path)?;

        info!(
            path = %output_path.display(),
            template = %self.template_path.display(),
            records = self.records.len(),
            worksheet = self.options.worksheet_index,
            "writing records from template"
        );

        let mut book = umya_spreadsheet::reader::xlsx::read(&self.template_path).map_err(|e| {
            SheetError::Spreadsheet(format!(
                "Failed to open template {}: {}",
                self.template_path.display(),
                e
            ))
        })?;

        self.fill(&mut book)?;

        super::ensure_writable(output_path)?;
        umya_spreadsheet::writer::xlsx::write(&book, output_path).map_err(|e| {
            SheetError::Spreadsheet(format!(
                "Failed to save Excel file {}: {}",
                output_path.display(),
                e
            ))
        })?;

        debug!(path = %output_path.display(), "workbook saved");
        Ok(())
    }

    /// Write every record into the selected worksheet of `book`
    pub(crate) fn fill(&self, book: &mut Spreadsheet) -> SheetResult<()> {
        let index = self.options.worksheet_index;
        let count = book.get_sheet_count();
        let worksheet = book
            .get_sheet_mut(&index)
            .ok_or(SheetError::WorksheetIndex { index, count })?;

        // Capture template styles first: the data rows may overlap the template row
        let styles = self.template_styles(worksheet);

        for (i, record) in self.records.iter().enumerate() {
            let row = self.options.initial_row + i as u32;
            for (j, (value, style)) in record.to_row().into_iter().zip(&styles).enumerate() {
                let address = cell_address(self.options.initial_column + j as u32, row);
                let cell = worksheet.get_cell_mut(address.as_str());
                write_cell_value(cell, &value);
                cell.set_style(style.clone());
            }
        }

        Ok(())
    }

    /// Style of the template-row cell for each mapped column
    fn template_styles(&self, worksheet: &Worksheet) -> Vec<Style> {
        (0..T::COLUMNS.len())
            .map(|j| {
                let address = cell_address(
                    self.options.initial_column + j as u32,
                    self.options.template_style_row,
                );
                worksheet.get_style(address.as_str()).clone()
            })
            .collect()
    }

    fn check_bounds(&self) -> SheetResult<()> {
        let last_column =
            u64::from(self.options.initial_column) + T::COLUMNS.len().saturating_sub(1) as u64;
        if last_column > MAX_COLUMNS as u64 {
            return Err(SheetError::OutOfBounds {
                row: u64::from(self.options.initial_row),
                column: last_column,
            });
        }
        let last_row =
            u64::from(self.options.initial_row) + self.records.len().saturating_sub(1) as u64;
        if last_row > MAX_ROWS as u64 {
            return Err(SheetError::OutOfBounds {
                row: last_row,
                column: u64::from(self.options.initial_column),
            });
        }
        Ok(())
    }
}

/// Replace a cell's content with `value`. Empty values clear whatever the
/// template held; text is stored verbatim so "007" stays text.
fn write_cell_value(cell: &mut Cell, value: &CellValue) {
    match value {
        CellValue::Empty => {
            cell.set_blank();
        }
        CellValue::Text(text) if text.is_empty() => {
            cell.set_blank();
        }
        CellValue::Text(text) => {
            cell.set_value_string(text.as_str());
        }
        CellValue::Int(i) if i.unsigned_abs() <= MAX_EXACT_INTEGER => {
            cell.set_value_number(*i as f64);
        }
        CellValue::Int(i) => {
            cell.set_value_string(i.to_string());
        }
        CellValue::Number(n) => {
            cell.set_value_number(*n);
        }
        CellValue::Bool(b) => {
            cell.set_value_bool(*b);
        }
        CellValue::Date(_) | CellValue::DateTime(_) => {
            cell.set_value_string(value.to_text());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet_record;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Pair {
        key: String,
        value: i64,
    }

    sheet_record! {
        Pair {
            key: String => "Key",
            value: i64 => "Value",
        }
    }

    fn styled_book() -> Spreadsheet {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet.get_cell_mut("B2").set_value("Key");
        sheet
            .get_cell_mut("B2")
            .get_style_mut()
            .set_background_color("FFFF0000");
        sheet.get_cell_mut("C2").set_value("Value");
        sheet.get_cell_mut("C2").get_style_mut().get_font_mut().set_bold(true);
        book
    }

    fn style_of(book: &Spreadsheet, address: &str) -> String {
        format!("{:?}", book.get_sheet(&0).unwrap().get_style(address))
    }

    #[test]
    fn test_fill_writes_values_and_copies_styles() {
        let records = vec![
            Pair {
                key: "a".to_string(),
                value: 1,
            },
            Pair {
                key: "b".to_string(),
                value: 2,
            },
        ];
        let options = TemplateOptions::new()
            .initial_column(2)
            .initial_row(3)
            .template_style_row(2);
        let exporter = TemplateExporter::new("unused.xlsx", &records, options);

        let mut book = styled_book();
        let unstyled = style_of(&book, "F9");
        exporter.fill(&mut book).unwrap();

        let sheet = book.get_sheet(&0).unwrap();
        assert_eq!(sheet.get_value("B3"), "a");
        assert_eq!(sheet.get_value("C4"), "2");

        for address in ["B3", "B4"] {
            assert_eq!(style_of(&book, address), style_of(&book, "B2"));
        }
        for address in ["C3", "C4"] {
            assert_eq!(style_of(&book, address), style_of(&book, "C2"));
        }
        assert_ne!(style_of(&book, "B3"), unstyled);
        assert_ne!(style_of(&book, "B3"), style_of(&book, "C3"));
    }

    #[test]
    fn test_fill_over_template_row() {
        let records = vec![
            Pair {
                key: "first".to_string(),
                value: 10,
            },
            Pair {
                key: "second".to_string(),
                value: 20,
            },
        ];
        let options = TemplateOptions::new()
            .initial_column(2)
            .initial_row(2)
            .template_style_row(2);
        let exporter = TemplateExporter::new("unused.xlsx", &records, options);

        let mut book = styled_book();
        let template_style = style_of(&book, "B2");
        exporter.fill(&mut book).unwrap();

        assert_eq!(book.get_sheet(&0).unwrap().get_value("B2"), "first");
        assert_eq!(style_of(&book, "B2"), template_style);
        assert_eq!(style_of(&book, "B3"), template_style);
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Entry {
        code: String,
        note: Option<String>,
        big: i64,
    }

    sheet_record! {
        Entry {
            code: String => "Code",
            note: Option<String> => "Note",
            big: i64 => "Big",
        }
    }

    #[test]
    fn test_fill_clears_empty_values_and_keeps_text() {
        let mut book = umya_spreadsheet::new_file();
        {
            let sheet = book.get_sheet_mut(&0).unwrap();
            sheet.get_cell_mut("A1").set_value("OLD-CODE");
            sheet.get_cell_mut("B1").set_value("OLD-NOTE");
            sheet.get_cell_mut("C1").set_value("1");
        }
        let records = vec![Entry {
            code: "007".to_string(),
            note: None,
            big: i64::MAX,
        }];
        let exporter = TemplateExporter::new("unused.xlsx", &records, TemplateOptions::default());
        exporter.fill(&mut book).unwrap();

        let sheet = book.get_sheet(&0).unwrap();
        assert_eq!(sheet.get_value("A1"), "007");
        assert_eq!(sheet.get_value("B1"), "");
        assert_eq!(sheet.get_value("C1"), i64::MAX.to_string());
    }

    #[test]
    fn test_fill_bad_worksheet_index() {
        let records = vec![Pair::default()];
        let exporter =
            TemplateExporter::new("unused.xlsx", &records, TemplateOptions::new().worksheet_index(3));

        let mut book = styled_book();
        let result = exporter.fill(&mut book);
        assert!(matches!(
            result,
            Err(SheetError::WorksheetIndex { index: 3, count: 1 })
        ));
    }

    #[test]
    fn test_bounds_beyond_last_column() {
        let records = vec![Pair::default()];
        let exporter = TemplateExporter::new(
            "unused.xlsx",
            &records,
            TemplateOptions::new().initial_column(MAX_COLUMNS),
        );
        assert!(matches!(
            exporter.check_bounds(),
            Err(SheetError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_missing_template_is_io_error() {
        let records = vec![Pair::default()];
        let exporter = TemplateExporter::new(
            "/nonexistent/template.xlsx",
            &records,
            TemplateOptions::default(),
        );
        let result = exporter.export(Path::new("/tmp/never-written.xlsx"));
        assert!(matches!(result, Err(SheetError::Io(_))));
    }
}
