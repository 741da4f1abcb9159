//! Validation findings and reports.
//!
//! This module defines what the engine hands to its collaborators: one
//! [`ValidationFinding`] per failed check, the aggregate
//! [`ValidationSummary`], and the [`ValidationReport`] bundling both.

use serde::{Deserialize, Serialize};

/// Error category for a column absent from the data sheet.
pub const MISSING_COLUMN: &str = "Missing column";

/// Error category for a required column with missing cells.
pub const MISSING_REQUIRED_VALUES: &str = "Missing required values";

/// Error category for an integer column with non-integer values.
pub const EXPECTED_INTEGER: &str = "Expected integer values";

/// Error category for a float column with non-numeric values.
pub const EXPECTED_FLOAT: &str = "Expected float values";

/// Error category for a date column with unparseable values.
pub const INVALID_DATE: &str = "Invalid date format";

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationFinding {
    /// Column the check ran against
    pub column: String,

    /// Human-readable category and detail, e.g. `Value below min: 30000`
    pub error: String,
}

impl ValidationFinding {
    /// Creates a new finding.
    pub fn new(column: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            error: error.into(),
        }
    }

    /// Finding for a column absent from the sheet.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::new(column, MISSING_COLUMN)
    }

    /// Finding for missing cells in a required column.
    pub fn missing_required(column: impl Into<String>) -> Self {
        Self::new(column, MISSING_REQUIRED_VALUES)
    }

    /// Finding for a value below the configured minimum.
    pub fn below_min(column: impl Into<String>, min: f64) -> Self {
        Self::new(column, format!("Value below min: {min}"))
    }

    /// Finding for a value above the configured maximum.
    pub fn above_max(column: impl Into<String>, max: f64) -> Self {
        Self::new(column, format!("Value above max: {max}"))
    }
}

/// Aggregate outcome for one sheet.
///
/// `total_rows` and `total_columns` describe the data sheet, not the rule
/// sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Number of rows in the data sheet
    pub total_rows: usize,

    /// Number of columns in the data sheet
    pub total_columns: usize,

    /// Whether no check failed
    pub validation_passed: bool,

    /// Number of findings
    pub errors: usize,
}

/// Summary plus ordered findings for one (rule sheet, data sheet) pair.
///
/// Created fresh per evaluation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Aggregate outcome
    pub summary: ValidationSummary,

    /// Failed checks in rule order, then check order
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    /// Builds a report, deriving the aggregate fields from the findings.
    pub fn new(total_rows: usize, total_columns: usize, findings: Vec<ValidationFinding>) -> Self {
        Self {
            summary: ValidationSummary {
                total_rows,
                total_columns,
                validation_passed: findings.is_empty(),
                errors: findings.len(),
            },
            findings,
        }
    }

    /// Returns true if no check failed.
    pub fn passed(&self) -> bool {
        self.summary.validation_passed
    }

    /// Splits the report into summary and findings.
    pub fn into_parts(self) -> (ValidationSummary, Vec<ValidationFinding>) {
        (self.summary, self.findings)
    }

    /// Renders findings as `- column: error` lines.
    pub fn failure_lines(&self) -> String {
        failure_lines(&self.findings)
    }
}

/// Renders findings as `- column: error` lines, one per finding.
pub fn failure_lines(findings: &[ValidationFinding]) -> String {
    findings
        .iter()
        .map(|f| format!("- {}: {}", f.column, f.error))
        .collect::<Vec<_>>()
        .join("\n")
}
