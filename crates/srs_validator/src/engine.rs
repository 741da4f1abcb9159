//! Main validation engine.
//!
//! This module evaluates rule sheets against data sheets. For every rule,
//! in rule-sheet order, the checks run in a fixed sequence:
//!
//! 1. column presence (a missing column ends the rule here)
//! 2. required values
//! 3. expected type
//! 4. min bound
//! 5. max bound
//!
//! Each failed check appends one finding. Evaluation never fails and keeps no
//! state between calls, so sheets can be evaluated in parallel by the caller.

use crate::{BoundCoercion, BoundOutcome, SheetMatcher, check_required, check_type};
use crate::{max_outcome, min_outcome};
use srs_core::{ColumnRule, DataTable, ValidationFinding, ValidationReport, Workbook};
use srs_parser::parse_rules;
use tracing::debug;

/// Evaluates every rule against a table.
///
/// `total_rows` and `total_columns` in the summary describe the table;
/// `errors` is the number of findings.
///
/// # Example
///
/// ```rust
/// use srs_core::{RuleBuilder, TableBuilder};
/// use srs_validator::evaluate;
///
/// let rules = vec![RuleBuilder::new("Bonus").required(true).build()];
/// let table = TableBuilder::new("Employees")
///     .values("Salary", [45000_i64])
///     .build()
///     .unwrap();
///
/// let report = evaluate(&rules, &table);
/// assert_eq!(report.summary.errors, 1);
/// assert_eq!(report.findings[0].error, "Missing column");
/// ```
pub fn evaluate(rules: &[ColumnRule], table: &DataTable) -> ValidationReport {
    let findings: Vec<ValidationFinding> = rules
        .iter()
        .flat_map(|rule| evaluate_rule(rule, table))
        .collect();

    let report = ValidationReport::new(table.rows(), table.column_count(), findings);
    debug!(
        sheet = table.name(),
        rules = rules.len(),
        errors = report.summary.errors,
        "Sheet evaluated"
    );
    report
}

/// Runs the checks of a single rule, in order.
pub fn evaluate_rule(rule: &ColumnRule, table: &DataTable) -> Vec<ValidationFinding> {
    let column = &rule.column_name;
    let Some(cells) = table.column(column) else {
        debug!(column = %column, "Column absent from sheet");
        return vec![ValidationFinding::missing_column(column)];
    };

    let mut findings = Vec::new();
    findings.extend(check_required(rule, cells));

    let values: Vec<_> = table.present_values(column).collect();
    findings.extend(check_type(rule, &values));

    if rule.min.is_some() || rule.max.is_some() {
        let coercion = BoundCoercion::from_values(values.iter().copied());

        if min_outcome(rule.min, &coercion) == BoundOutcome::Violated {
            findings.extend(rule.min.map(|min| ValidationFinding::below_min(column, min)));
        }
        if max_outcome(rule.max, &coercion) == BoundOutcome::Violated {
            findings.extend(rule.max.map(|max| ValidationFinding::above_max(column, max)));
        }
        if coercion == BoundCoercion::NotCoercible {
            debug!(column = %column, "Bounds skipped: column is not numeric");
        }
    }

    findings
}

/// What happened to one data sheet during a workbook run.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetOutcome<'a> {
    /// The sheet was paired with a rule sheet and evaluated
    Validated {
        /// The data sheet
        sheet: &'a DataTable,
        /// Name of the rule sheet it was paired with
        rule_sheet: String,
        /// Evaluation result
        report: ValidationReport,
    },
    /// No rule sheet was similar enough; the sheet was not evaluated
    Unmatched {
        /// The data sheet
        sheet: &'a DataTable,
    },
}

impl SheetOutcome<'_> {
    /// Returns the data sheet.
    pub fn sheet(&self) -> &DataTable {
        match self {
            SheetOutcome::Validated { sheet, .. } | SheetOutcome::Unmatched { sheet } => sheet,
        }
    }

    /// Returns true unless the sheet was evaluated and failed.
    pub fn passed(&self) -> bool {
        match self {
            SheetOutcome::Validated { report, .. } => report.passed(),
            SheetOutcome::Unmatched { .. } => true,
        }
    }
}

/// Pairs each data sheet with its closest rule sheet and evaluates it.
///
/// Data sheets keep their workbook order. Sheets without a close enough
/// rule sheet are reported as unmatched and never evaluated.
pub fn validate_workbook<'a>(
    rules: &Workbook,
    data: &'a Workbook,
    matcher: &SheetMatcher,
) -> Vec<SheetOutcome<'a>> {
    let candidates = rules.sheet_names();

    data.sheets()
        .map(|sheet| {
            let matched = matcher
                .best_match(sheet.name(), candidates.iter().copied())
                .and_then(|name| rules.sheet(name));

            match matched {
                Some(rule_sheet) => {
                    debug!(sheet = sheet.name(), rule_sheet = rule_sheet.name(), "Sheet matched");
                    SheetOutcome::Validated {
                        sheet,
                        rule_sheet: rule_sheet.name().to_string(),
                        report: evaluate(&parse_rules(rule_sheet), sheet),
                    }
                }
                None => {
                    debug!(sheet = sheet.name(), "No matching rule sheet");
                    SheetOutcome::Unmatched { sheet }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use srs_core::{CellValue, ExpectedType, RuleBuilder, TableBuilder, ValidationSummary};

    fn text(s: &str) -> Option<CellValue> {
        Some(CellValue::from(s))
    }

    #[test]
    fn test_empty_rules_pass() {
        let table = TableBuilder::new("S").values("a", [1_i64]).build().unwrap();
        let report = evaluate(&[], &table);
        assert!(report.passed());
        assert_eq!(report.summary.total_rows, 1);
        assert_eq!(report.summary.total_columns, 1);
    }

    #[test]
    fn test_empty_table() {
        let table = DataTable::empty("Empty");
        let rules = vec![RuleBuilder::new("a").required(true).build()];
        let report = evaluate(&rules, &table);
        assert_eq!(
            report.summary,
            ValidationSummary {
                total_rows: 0,
                total_columns: 0,
                validation_passed: false,
                errors: 1,
            }
        );
        assert_eq!(report.findings, vec![ValidationFinding::missing_column("a")]);
    }

    #[test]
    fn test_zero_rows_with_columns() {
        let table = TableBuilder::new("S").column("a", vec![]).build().unwrap();
        let rules = vec![
            RuleBuilder::new("a")
                .required(true)
                .expected_type(ExpectedType::Integer)
                .range(1.0, 2.0)
                .build(),
        ];
        assert!(evaluate(&rules, &table).passed());
    }

    #[test]
    fn test_check_order_within_rule() {
        let table = TableBuilder::new("S")
            .column(
                "n",
                vec![Some(CellValue::Float(0.5)), None, Some(CellValue::Integer(99))],
            )
            .build()
            .unwrap();
        let rules = vec![
            RuleBuilder::new("n")
                .required(true)
                .expected_type(ExpectedType::Integer)
                .range(1.0, 10.0)
                .build(),
        ];

        let errors: Vec<_> = evaluate(&rules, &table)
            .findings
            .into_iter()
            .map(|f| f.error)
            .collect();
        assert_eq!(
            errors,
            vec![
                "Missing required values",
                "Expected integer values",
                "Value below min: 1",
                "Value above max: 10",
            ]
        );
    }

    #[test]
    fn test_inverted_range_is_unsatisfiable() {
        let table = TableBuilder::new("S").values("n", [5_i64]).build().unwrap();
        let rules = vec![RuleBuilder::new("n").range(10.0, 1.0).build()];
        let report = evaluate(&rules, &table);
        assert_eq!(
            report.findings,
            vec![
                ValidationFinding::below_min("n", 10.0),
                ValidationFinding::above_max("n", 1.0),
            ]
        );
    }

    #[test]
    fn test_text_numbers_are_bounded() {
        let table = TableBuilder::new("S")
            .column("n", vec![text("5"), text(" 50 ")])
            .build()
            .unwrap();
        let rules = vec![RuleBuilder::new("n").max(10.0).build()];
        assert_eq!(
            evaluate(&rules, &table).findings,
            vec![ValidationFinding::above_max("n", 10.0)]
        );
    }

    #[test]
    fn test_pattern_is_not_enforced() {
        let table = TableBuilder::new("S")
            .values("id", ["EMP001", "nope"])
            .build()
            .unwrap();
        let rules = vec![RuleBuilder::new("id").pattern(r"^EMP\d{3}$").build()];
        assert!(evaluate(&rules, &table).passed());
    }

    #[test]
    fn test_validate_workbook_pairs_and_skips() {
        let mut srs = Workbook::new();
        srs.add_sheet(
            TableBuilder::new("Employees")
                .column("Column Name", vec![text("Bonus")])
                .build()
                .unwrap(),
        )
        .unwrap();

        let mut data = Workbook::new();
        data.add_sheet(
            TableBuilder::new("Employee")
                .values("Salary", [1_i64])
                .build()
                .unwrap(),
        )
        .unwrap();
        data.add_sheet(DataTable::empty("Zzz")).unwrap();

        let outcomes = validate_workbook(&srs, &data, &SheetMatcher::default());
        assert_eq!(outcomes.len(), 2);

        match &outcomes[0] {
            SheetOutcome::Validated {
                rule_sheet, report, ..
            } => {
                assert_eq!(rule_sheet, "Employees");
                assert_eq!(report.findings, vec![ValidationFinding::missing_column("Bonus")]);
            }
            other => panic!("expected a validated sheet, got {other:?}"),
        }
        assert!(!outcomes[0].passed());
        assert!(matches!(outcomes[1], SheetOutcome::Unmatched { .. }));
        assert_eq!(outcomes[1].sheet().name(), "Zzz");
    }
}
