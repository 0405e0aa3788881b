//! sheetmap - typed records to and from Excel spreadsheets
//!
//! This library maps a list of uniformly-typed records onto worksheet rows,
//! one column per field, and reads such rows back into records.
//!
//! # Features
//!
//! - Plain export with an optional header row and auto-sized columns
//! - Export into a copy of a template workbook, copying each column's style
//!   from a template row
//! - Import that stops at the first blank row
//! - Compile-time record schemas via [`sheet_record!`], no runtime reflection
//! - Async variants running on the tokio blocking pool
//!
//! # Example
//!
//! ```no_run
//! use sheetmap::{sheet_record, ReadOptions, RecordSheetMapper};
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct Person {
//!     id: i64,
//!     first_name: String,
//!     last_name: String,
//! }
//!
//! sheet_record! {
//!     Person {
//!         id: i64 => "Id",
//!         first_name: String => "FirstName",
//!         last_name: String => "LastName",
//!     }
//! }
//!
//! let people = vec![Person { id: 1, first_name: "Ann".into(), last_name: "Lee".into() }];
//! let mapper = RecordSheetMapper::new();
//! mapper.write_file("people.xlsx", &people)?;
//!
//! // Row 1 holds the headers
//! let read: Vec<Person> = mapper.read_file_with("people.xlsx", &ReadOptions::new().starting_row(2))?;
//! assert_eq!(read, people);
//! # Ok::<(), sheetmap::SheetError>(())
//! ```

pub mod config;
pub mod error;
pub mod excel;
pub mod logging;
pub mod mapper;
pub mod record;
pub mod types;

// Re-export commonly used types
pub use config::{MapperConfig, ReadOptions, TemplateOptions, WriteOptions};
pub use error::{ConversionError, SheetError, SheetResult};
pub use mapper::RecordSheetMapper;
pub use record::{CellType, Record};
pub use types::{CellKind, CellValue, Column};
