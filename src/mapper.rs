//! The record ↔ spreadsheet mapper facade

use crate::config::{MapperConfig, ReadOptions, TemplateOptions, WriteOptions};
use crate::error::SheetResult;
use crate::excel::{RecordExporter, RecordImporter, TemplateExporter};
use crate::record::Record;
use std::path::{Path, PathBuf};

/// Writes records to spreadsheets and reads them back.
///
/// The `*_with` methods take explicit options; the others use the defaults in
/// the mapper's [`MapperConfig`]. Every call opens, uses and releases its own
/// workbook, so a mapper can be shared freely, but calls against the same
/// file must not overlap.
#[derive(Debug, Clone, Default)]
pub struct RecordSheetMapper {
    config: MapperConfig,
}

impl RecordSheetMapper {
    /// Create a mapper with the default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper whose default options come from `config`
    pub fn with_config(config: MapperConfig) -> SheetResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Write `records` to a new workbook at `path`, one row per record.
    pub fn write_file<T: Record>(&self, path: impl AsRef<Path>, records: &[T]) -> SheetResult<()> {
        self.write_file_with(path, records, &self.config.write)
    }

    pub fn write_file_with<T: Record>(
        &self,
        path: impl AsRef<Path>,
        records: &[T],
        options: &WriteOptions,
    ) -> SheetResult<()> {
        RecordExporter::new(records, options.clone()).export(path.as_ref())
    }

    /// Write `records` into a copy of the template workbook, styling each cell
    /// like the template-row cell of its column.
    pub fn write_file_from_template<T: Record>(
        &self,
        path: impl AsRef<Path>,
        template_path: impl AsRef<Path>,
        records: &[T],
    ) -> SheetResult<()> {
        self.write_file_from_template_with(path, template_path, records, &self.config.template)
    }

    pub fn write_file_from_template_with<T: Record>(
        &self,
        path: impl AsRef<Path>,
        template_path: impl AsRef<Path>,
        records: &[T],
        options: &TemplateOptions,
    ) -> SheetResult<()> {
        TemplateExporter::new(template_path, records, *options).export(path.as_ref())
    }

    /// Read records from a worksheet until the first blank row.
    pub fn read_file<T: Record>(&self, path: impl AsRef<Path>) -> SheetResult<Vec<T>> {
        self.read_file_with(path, &self.config.read)
    }

    pub fn read_file_with<T: Record>(
        &self,
        path: impl AsRef<Path>,
        options: &ReadOptions,
    ) -> SheetResult<Vec<T>> {
        RecordImporter::new(path, *options).import()
    }

    /// [`write_file`](Self::write_file) on the blocking thread pool
    pub async fn write_file_async<T>(&self, path: impl Into<PathBuf>, records: Vec<T>) -> SheetResult<()>
    where
        T: Record + Send + 'static,
    {
        let path = path.into();
        let options = self.config.write.clone();
        tokio::task::spawn_blocking(move || RecordExporter::new(&records, options).export(&path))
            .await?
    }

    /// [`write_file_from_template`](Self::write_file_from_template) on the blocking thread pool
    pub async fn write_file_from_template_async<T>(
        &self,
        path: impl Into<PathBuf>,
        template_path: impl Into<PathBuf>,
        records: Vec<T>,
    ) -> SheetResult<()>
    where
        T: Record + Send + 'static,
    {
        let path = path.into();
        let template_path = template_path.into();
        let options = self.config.template;
        tokio::task::spawn_blocking(move || {
            TemplateExporter::new(template_path, &records, options).export(&path)
        })
        .await?
    }

    /// [`read_file`](Self::read_file) on the blocking thread pool
    pub async fn read_file_async<T>(&self, path: impl Into<PathBuf>) -> SheetResult<Vec<T>>
    where
        T: Record + Send + 'static,
    {
        let importer = RecordImporter::new(path.into(), self.config.read);
        tokio::task::spawn_blocking(move || importer.import()).await?
    }
}
