//! Mapper options and their YAML configuration file
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```yaml
//! write:
//!   sheet_name: People
//! template:
//!   initial_row: 2
//!   template_style_row: 2
//! read:
//!   starting_row: 2
//! ```

use crate::error::{SheetError, SheetResult};
use crate::excel::address::{MAX_COLUMNS, MAX_ROWS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Characters Excel rejects in worksheet names.
const INVALID_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
const MAX_SHEET_NAME_LEN: usize = 31;

/// Options for the plain writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    pub sheet_name: String,
    pub print_headers: bool,
    /// Auto-size columns to their content after writing
    pub autofit: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            print_headers: true,
            autofit: true,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    pub fn print_headers(mut self, print_headers: bool) -> Self {
        self.print_headers = print_headers;
        self
    }

    pub fn autofit(mut self, autofit: bool) -> Self {
        self.autofit = autofit;
        self
    }

    pub fn validate(&self) -> SheetResult<()> {
        let name = self.sheet_name.as_str();
        if name.trim().is_empty() {
            return Err(SheetError::Validation(
                "Worksheet name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(SheetError::Validation(format!(
                "Worksheet name '{}' exceeds {} characters",
                name, MAX_SHEET_NAME_LEN
            )));
        }
        if let Some(c) = name.chars().find(|c| INVALID_SHEET_NAME_CHARS.contains(c)) {
            return Err(SheetError::Validation(format!(
                "Worksheet name '{}' contains invalid character '{}'",
                name, c
            )));
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(SheetError::Validation(format!(
                "Worksheet name '{}' must not start or end with an apostrophe",
                name
            )));
        }
        Ok(())
    }
}

/// Options for the template-based writer. Coordinates are 1-based; the
/// worksheet index is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    pub worksheet_index: usize,
    pub initial_column: u32,
    pub initial_row: u32,
    /// Row whose cell styles are copied onto the written cells, column by column
    pub template_style_row: u32,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            worksheet_index: 0,
            initial_column: 1,
            initial_row: 1,
            template_style_row: 1,
        }
    }
}

impl TemplateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn worksheet_index(mut self, index: usize) -> Self {
        self.worksheet_index = index;
        self
    }

    pub fn initial_column(mut self, column: u32) -> Self {
        self.initial_column = column;
        self
    }

    pub fn initial_row(mut self, row: u32) -> Self {
        self.initial_row = row;
        self
    }

    pub fn template_style_row(mut self, row: u32) -> Self {
        self.template_style_row = row;
        self
    }

    pub fn validate(&self) -> SheetResult<()> {
        check_row("initial_row", self.initial_row)?;
        check_row("template_style_row", self.template_style_row)?;
        check_column("initial_column", self.initial_column)
    }
}

/// Options for the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    pub worksheet_index: usize,
    pub starting_row: u32,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            worksheet_index: 0,
            starting_row: 1,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn worksheet_index(mut self, index: usize) -> Self {
        self.worksheet_index = index;
        self
    }

    pub fn starting_row(mut self, row: u32) -> Self {
        self.starting_row = row;
        self
    }

    /// Rows past the last worksheet row are allowed; they simply read nothing.
    pub fn validate(&self) -> SheetResult<()> {
        if self.starting_row == 0 {
            return Err(SheetError::Validation(
                "starting_row is 1-based and must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default options for a [`crate::RecordSheetMapper`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub write: WriteOptions,
    pub template: TemplateOptions,
    pub read: ReadOptions,
}

impl MapperConfig {
    /// Parse and validate a YAML config document
    pub fn from_yaml_str(content: &str) -> SheetResult<Self> {
        let config: MapperConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> SheetResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> SheetResult<()> {
        self.write.validate()?;
        self.template.validate()?;
        self.read.validate()
    }
}

fn check_row(name: &str, row: u32) -> SheetResult<()> {
    if row == 0 || row > MAX_ROWS {
        return Err(SheetError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_ROWS, row
        )));
    }
    Ok(())
}

fn check_column(name: &str, column: u32) -> SheetResult<()> {
    if column == 0 || column > MAX_COLUMNS {
        return Err(SheetError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_COLUMNS, column
        )));
    }
    Ok(())
}
