//! Error types for building tables.
//!
//! Validation itself never fails: failed checks are reported as findings.
//! The only errors at this level come from assembling a `DataTable` whose
//! shape is inconsistent.

use thiserror::Error;

/// Result type for table construction.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised while assembling a [`DataTable`](crate::DataTable).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// Two columns share the same name
    #[error("Duplicate column '{column}' in sheet '{sheet}'")]
    DuplicateColumn {
        /// Sheet name
        sheet: String,
        /// Repeated column name
        column: String,
    },

    /// A column's length differs from the sheet's row count
    #[error("Column '{column}' in sheet '{sheet}' has {actual} values, expected {expected}")]
    RaggedColumn {
        /// Sheet name
        sheet: String,
        /// Offending column
        column: String,
        /// Row count of the sheet
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// A row has more or fewer cells than there are columns
    #[error("Row {row} in sheet '{sheet}' has {actual} cells, expected {expected}")]
    RaggedRow {
        /// Sheet name
        sheet: String,
        /// Zero-based row index
        row: usize,
        /// Number of columns
        expected: usize,
        /// Number of cells supplied
        actual: usize,
    },

    /// Two sheets in a workbook share the same name
    #[error("Duplicate sheet '{0}'")]
    DuplicateSheet(String),
}
