//! Stored record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use srs_assistant::{Completion, ResponseKind};
use srs_core::{DataTable, ValidationFinding, ValidationReport, ValidationSummary};
use uuid::Uuid;

/// Layout of one sheet of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetInfo {
    /// Sheet name
    pub name: String,
    /// Number of data rows
    pub rows: usize,
    /// Number of columns
    pub columns: usize,
    /// Column names in sheet order
    pub column_names: Vec<String>,
}

impl SheetInfo {
    /// Describes a loaded sheet.
    pub fn from_table(table: &DataTable) -> Self {
        Self {
            name: table.name().to_string(),
            rows: table.rows(),
            columns: table.column_count(),
            column_names: table.columns().to_vec(),
        }
    }
}

/// An uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: String,
    pub filename: String,
    pub file_type: String,
    pub upload_date: DateTime<Utc>,
    pub file_size: usize,
    /// Sheet names in workbook order
    pub sheets: Vec<String>,
    pub sheet_info: Vec<SheetInfo>,
}

impl UploadRecord {
    pub(crate) fn new(content: &[u8], filename: &str, file_type: &str, sheets: &[SheetInfo]) -> Self {
        Self {
            id: new_id(),
            filename: filename.to_string(),
            file_type: file_type.to_string(),
            upload_date: Utc::now(),
            file_size: content.len(),
            sheets: sheets.iter().map(|sheet| sheet.name.clone()).collect(),
            sheet_info: sheets.to_vec(),
        }
    }
}

/// Outcome of a stored validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Passed,
    Failed,
}

/// The validation result of one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub id: String,
    /// Upload the sheet came from, if the upload itself was stored
    pub file_id: Option<String>,
    pub sheet_name: String,
    pub validation_date: DateTime<Utc>,
    pub validation_summary: ValidationSummary,
    pub failed_rules: Vec<ValidationFinding>,
    pub total_failures: usize,
    pub status: ValidationStatus,
}

impl ValidationRecord {
    pub(crate) fn new(file_id: Option<&str>, sheet: &str, report: &ValidationReport) -> Self {
        let status = if report.findings.is_empty() {
            ValidationStatus::Passed
        } else {
            ValidationStatus::Failed
        };
        Self {
            id: new_id(),
            file_id: file_id.map(str::to_string),
            sheet_name: sheet.to_string(),
            validation_date: Utc::now(),
            validation_summary: report.summary.clone(),
            failed_rules: report.findings.clone(),
            total_failures: report.findings.len(),
            status,
        }
    }
}

/// A stored model response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResponseRecord {
    pub id: String,
    /// Upload the sheet came from, if the upload itself was stored
    pub file_id: Option<String>,
    pub sheet_name: String,
    pub response_type: ResponseKind,
    pub prompt: String,
    pub ai_response: String,
    pub model_used: String,
    pub generated_date: DateTime<Utc>,
    /// Length of the response in characters
    pub response_length: usize,
}

impl AiResponseRecord {
    pub(crate) fn new(file_id: Option<&str>, sheet: &str, completion: &Completion) -> Self {
        Self {
            id: new_id(),
            file_id: file_id.map(str::to_string),
            sheet_name: sheet.to_string(),
            response_type: completion.kind,
            prompt: completion.prompt.clone(),
            ai_response: completion.text.clone(),
            model_used: completion.model.clone(),
            generated_date: Utc::now(),
            response_length: completion.text.chars().count(),
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
