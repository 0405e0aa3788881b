//! Excel backends for the record mapper
//!
//! - Export: records → fresh .xlsx (rust_xlsxwriter)
//! - Template export: records → copy of a styled template (umya-spreadsheet)
//! - Import: .xlsx rows → records (calamine)

pub mod address;
mod exporter;
mod importer;
mod template;

pub use address::{cell_address, column_letters, parse_cell_address};
pub use exporter::RecordExporter;
pub use importer::RecordImporter;
pub use template::TemplateExporter;

use crate::error::SheetResult;
use std::fs::OpenOptions;
use std::path::Path;

/// Open the destination for writing so permission and missing-directory
/// failures surface as IO errors before the backend serializes the workbook.
fn ensure_writable(path: &Path) -> SheetResult<()> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    Ok(())
}
