use anyhow::{Context, Result};
use regex::Regex;
use serde_json::json;
use srs_core::ColumnRule;
use srs_parser::{load_workbook, parse_rules};
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(srs_path: &str, format: &str) -> Result<()> {
    info!("Checking SRS file: {}", srs_path);

    let workbook = load_workbook(Path::new(srs_path))
        .with_context(|| format!("Failed to load SRS file: {}", srs_path))?;

    let mut sheets = Vec::with_capacity(workbook.len());
    let mut total_warnings = 0;

    for table in workbook.sheets() {
        let rules = parse_rules(table);
        let warnings = lint_rules(&rules);
        total_warnings += warnings.len();

        if format == "json" {
            sheets.push(json!({
                "sheet": table.name(),
                "rules": rules,
                "warnings": warnings,
            }));
        } else {
            output::print_rule_sheet(table.name(), &rules);
            for warning in &warnings {
                output::print_warning(&format!("{}: {}", table.name(), warning));
            }
        }
    }

    if format == "json" {
        output::print_json(&json!({
            "sheets": sheets,
            "warnings": total_warnings,
        }));
        return Ok(());
    }

    println!();
    output::print_success(&format!(
        "Loaded {} rule sheet(s) with {} warning(s)",
        workbook.len(),
        total_warnings
    ));

    Ok(())
}

/// Problems that do not stop validation but probably are not intended.
fn lint_rules(rules: &[ColumnRule]) -> Vec<String> {
    let mut warnings = Vec::new();

    for (row, rule) in rules.iter().enumerate() {
        if rule.column_name.trim().is_empty() {
            warnings.push(format!("rule {} has no column name", row + 1));
        }
        if rule.has_inverted_range() {
            warnings.push(format!(
                "column '{}' has min {} above max {}, no value can pass",
                rule.column_name,
                rule.min.unwrap_or_default(),
                rule.max.unwrap_or_default()
            ));
        }
        if let Some(pattern) = &rule.pattern {
            if let Err(e) = Regex::new(pattern) {
                warnings.push(format!(
                    "column '{}' has an invalid regex: {}",
                    rule.column_name,
                    e.to_string().lines().last().unwrap_or_default().trim()
                ));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use srs_core::RuleBuilder;

    #[test]
    fn test_clean_rules_have_no_warnings() {
        let rules = vec![
            RuleBuilder::new("Employee_ID").pattern(r"^EMP\d{3}$").build(),
            RuleBuilder::new("Salary").range(30000.0, 500000.0).build(),
        ];
        assert!(lint_rules(&rules).is_empty());
    }

    #[test]
    fn test_lint_findings() {
        let rules = vec![
            RuleBuilder::new("Age").range(65.0, 18.0).build(),
            RuleBuilder::new("Code").pattern("([a-z]").build(),
            RuleBuilder::new("").build(),
        ];
        let warnings = lint_rules(&rules);

        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings[0], "column 'Age' has min 65 above max 18, no value can pass");
        assert!(warnings[1].starts_with("column 'Code' has an invalid regex"));
        assert_eq!(warnings[2], "rule 3 has no column name");
    }
}
