//! Prompt construction.

use serde_json::Value;
use srs_core::{DataTable, ValidationFinding, failure_lines};

/// Number of rows shown to the model when summarizing a sheet.
pub const SAMPLE_ROWS: usize = 3;

/// Builds the prompt asking the model to explain a sheet's findings.
pub fn explanation_prompt(sheet: &str, findings: &[ValidationFinding]) -> String {
    format!(
        "\nYou are a data validation assistant. Explain why the following fields failed \
         validation in sheet '{sheet}' and what the user can do to fix them:\n\n{}\n\n\
         Respond clearly and helpfully.\n",
        failure_lines(findings)
    )
}

/// Builds the prompt asking the model to describe a sheet from a sample of rows.
pub fn summary_prompt(table: &DataTable) -> String {
    let sample = Value::Array(
        table
            .head_records(SAMPLE_ROWS)
            .into_iter()
            .map(Value::Object)
            .collect(),
    );
    format!(
        "\nGiven the sheet '{}' with sample data:\n{sample}\n\n\
         Explain what this data appears to represent and briefly describe each column.\n",
        table.name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use srs_core::TableBuilder;

    #[test]
    fn test_explanation_prompt_lists_findings() {
        let findings = vec![
            ValidationFinding::missing_required("Employee_ID"),
            ValidationFinding::below_min("Salary", 30000.0),
        ];
        let prompt = explanation_prompt("Employees", &findings);

        assert!(prompt.contains("in sheet 'Employees'"));
        assert!(prompt.contains(
            "- Employee_ID: Missing required values\n- Salary: Value below min: 30000\n"
        ));
        assert!(prompt.trim_end().ends_with("Respond clearly and helpfully."));
    }

    #[test]
    fn test_summary_prompt_samples_three_rows() {
        let table = TableBuilder::new("Payroll")
            .values("id", [1_i64, 2, 3, 4])
            .values("name", ["Ann", "Bo", "Cy", "Di"])
            .build()
            .unwrap();
        let prompt = summary_prompt(&table);

        assert!(prompt.contains("Given the sheet 'Payroll' with sample data:"));
        assert!(prompt.contains(r#"[{"id":1,"name":"Ann"},{"id":2,"name":"Bo"},{"id":3,"name":"Cy"}]"#));
        assert!(!prompt.contains("Di"));
    }

    #[test]
    fn test_summary_prompt_empty_sheet() {
        let table = DataTable::empty("Blank");
        assert!(summary_prompt(&table).contains("sample data:\n[]\n"));
    }
}
