//! Parser for SRS rule sheets and data sheets.
//!
//! This crate turns files on disk into [`Workbook`](srs_core::Workbook)s of
//! named sheets, and turns the rows of a rule sheet into strongly-typed
//! [`ColumnRule`](srs_core::ColumnRule)s.
//!
//! Supported inputs:
//!
//! - `.csv` file: a single sheet named `Sheet1`
//! - directory: every `*.csv` file becomes a sheet named after its stem
//! - `.xlsx`/`.xlsm`/`.xlsb`/`.xls`/`.ods`: every worksheet becomes a sheet
//! - `.yaml`/`.yml`/`.toml`: a rule document with a `sheets` table
//!
//! # Example
//!
//! ```rust
//! use srs_parser::{parse_rules, parse_yaml_workbook};
//!
//! let yaml = r#"
//! sheets:
//!   Employees:
//!     - Column Name: Salary
//!       Type: float
//!       Required: "Yes"
//!       Min: 30000
//! "#;
//!
//! let workbook = parse_yaml_workbook(yaml).expect("Failed to parse rule document");
//! let rules = parse_rules(workbook.sheet("Employees").unwrap());
//! assert_eq!(rules[0].column_name, "Salary");
//! assert_eq!(rules[0].min, Some(30000.0));
//! ```

mod delimited;
mod document;
mod rule;
mod spreadsheet;
mod workbook;

pub use delimited::{parse_csv, parse_csv_str};
pub use document::{parse_toml_workbook, parse_yaml_workbook};
pub use rule::*;
pub use spreadsheet::parse_spreadsheet;
pub use workbook::{SheetFormat, detect_format, load_workbook};

use srs_core::TableError;
use thiserror::Error;

/// Errors that can occur while reading sheets.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// CSV reading failed
    #[error("Failed to read CSV: {0}")]
    CsvError(#[from] csv::Error),

    /// Spreadsheet reading failed
    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// A CSV record has more fields than the header
    #[error("Sheet '{sheet}' line {line}: expected {expected} fields, saw {actual}")]
    MalformedRow {
        /// Sheet name
        sheet: String,
        /// One-based line number
        line: u64,
        /// Header width
        expected: usize,
        /// Fields in the record
        actual: usize,
    },

    /// The document parsed but does not have the expected shape
    #[error("Invalid rule document: {0}")]
    InvalidDocument(String),

    /// Sheet assembly failed
    #[error(transparent)]
    Table(#[from] TableError),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// A directory contained no sheets
    #[error("No sheets found in {0}")]
    EmptyWorkbook(String),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;
