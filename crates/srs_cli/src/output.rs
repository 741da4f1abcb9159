use colored::*;
use serde::Serialize;
use serde_json::{Value, json};
use srs_core::{ColumnRule, DataTable, ValidationReport};
use srs_store::{AiResponseRecord, UploadRecord, ValidationRecord, ValidationStatus};

const RULE: &str = "═";
const WIDTH: usize = 60;

pub fn print_sheet_header(sheet: &DataTable, rule_sheet: Option<&str>) {
    println!("\n{}", RULE.repeat(WIDTH));
    println!("{}", format!("  SHEET: {}", sheet.name()).bold());
    println!("{}", RULE.repeat(WIDTH));
    if let Some(rule_sheet) = rule_sheet {
        print_info(&format!("Matched with SRS sheet: '{}'", rule_sheet));
    }
    print_info(&format!(
        "Data preview: {} rows × {} columns",
        sheet.rows(),
        sheet.column_count()
    ));
}

pub fn print_text_report(report: &ValidationReport) {
    if report.passed() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "All validations passed for this sheet".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
        println!("\n{}", "Failed validations:".red().bold());
        for (i, finding) in report.findings.iter().enumerate() {
            println!(
                "  {}. {}: {}",
                i + 1,
                finding.column.bold(),
                finding.error.red()
            );
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Total rows:    {}", report.summary.total_rows);
    println!("  Total columns: {}", report.summary.total_columns);
    println!("  Errors:        {}", report.summary.errors);
}

pub fn print_completion(title: &str, text: &str) {
    println!("\n{}", title.cyan().bold());
    for line in text.lines() {
        println!("  {}", line);
    }
}

/// JSON entry for one data sheet of a validation run.
pub fn sheet_json(
    sheet: &DataTable,
    rule_sheet: Option<&str>,
    report: Option<&ValidationReport>,
    explanation: Option<&str>,
    data_summary: Option<&str>,
) -> Value {
    json!({
        "sheet": sheet.name(),
        "rule_sheet": rule_sheet,
        "rows": sheet.rows(),
        "columns": sheet.column_count(),
        "summary": report.map(|r| &r.summary),
        "findings": report.map(|r| &r.findings),
        "explanation": explanation,
        "data_summary": data_summary,
    })
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => print_error(&format!("Failed to render JSON: {}", e)),
    }
}

pub fn print_rule_sheet(name: &str, rules: &[ColumnRule]) {
    println!("\n{} ({} rules)", name.bold(), rules.len());
    for rule in rules {
        let mut parts = vec![format!("type={}", rule.expected_type)];
        parts.push(format!(
            "required={}",
            if rule.required { "yes" } else { "no" }
        ));
        if let Some(min) = rule.min {
            parts.push(format!("min={}", min));
        }
        if let Some(max) = rule.max {
            parts.push(format!("max={}", max));
        }
        if let Some(pattern) = &rule.pattern {
            parts.push(format!("regex={}", pattern));
        }
        println!("  - {}: {}", rule.column_name, parts.join(", "));
    }
}

pub fn print_uploads(records: &[UploadRecord]) {
    if records.is_empty() {
        print_info("No uploads recorded");
        return;
    }
    for record in records {
        println!("{} {}", "📄".bold(), record.filename.bold());
        println!("  Id:       {}", record.id);
        println!("  Uploaded: {}", record.upload_date.format("%Y-%m-%d %H:%M"));
        println!("  Size:     {} bytes", record.file_size);
        println!("  Sheets:   {}", record.sheets.len());
    }
}

pub fn print_validations(records: &[ValidationRecord]) {
    if records.is_empty() {
        print_info("No validation results recorded");
        return;
    }
    for record in records {
        let status = match record.status {
            ValidationStatus::Passed => "passed".green().bold(),
            ValidationStatus::Failed => "failed".red().bold(),
        };
        println!(
            "{} {} [{}] {} failure(s)",
            record.validation_date.format("%Y-%m-%d %H:%M"),
            record.sheet_name.bold(),
            status,
            record.total_failures
        );
        println!("  File: {}", record.file_id.as_deref().unwrap_or("(upload not recorded)"));
        for finding in &record.failed_rules {
            println!("  - {}: {}", finding.column, finding.error);
        }
    }
}

pub fn print_ai_responses(records: &[AiResponseRecord]) {
    if records.is_empty() {
        print_info("No model responses recorded");
        return;
    }
    for record in records {
        println!(
            "{} {} [{}] via {} ({} chars)",
            record.generated_date.format("%Y-%m-%d %H:%M"),
            record.sheet_name.bold(),
            record.response_type,
            record.model_used,
            record.response_length
        );
        println!("  File: {}", record.file_id.as_deref().unwrap_or("(upload not recorded)"));
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
