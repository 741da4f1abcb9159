//! Rule row parsing.
//!
//! Rule sheets are read like any other sheet; each row is then turned into a
//! [`ColumnRule`] once, with the defaulting rules applied here. Nothing in
//! this module fails: a malformed rule row still yields a rule, and the
//! problem surfaces later as a finding (usually `Missing column`).

use srs_core::{CellValue, ColumnRule, DataTable, ExpectedType};
use std::collections::HashMap;

/// Header for the target column name.
pub const COLUMN_NAME_HEADER: &str = "Column Name";

/// Alternate header for the target column name.
pub const COLUMN_ALIAS_HEADER: &str = "column";

/// Header for the expected type.
pub const TYPE_HEADER: &str = "Type";

/// Header for the required flag.
pub const REQUIRED_HEADER: &str = "Required";

/// Header for the lower bound.
pub const MIN_HEADER: &str = "Min";

/// Header for the upper bound.
pub const MAX_HEADER: &str = "Max";

/// Header for the pattern.
pub const REGEX_HEADER: &str = "Regex";

/// One row of a rule sheet, keyed by header.
///
/// Absent keys and missing values are treated the same.
pub type RuleRow = HashMap<String, CellValue>;

/// Parses one rule row.
///
/// - the column name comes from `Column Name`, falling back to `column`,
///   then to an empty name
/// - `Type` is parsed with [`ExpectedType::parse`]; unknown types disable
///   the type check
/// - `Required` is true only for a case-insensitive `yes`
/// - `Min`/`Max` accept numeric cells or numeric text; anything else leaves
///   the bound unset
/// - `Regex` is kept verbatim
///
/// # Example
///
/// ```rust
/// use srs_core::{CellValue, ExpectedType};
/// use srs_parser::{parse_rule, RuleRow};
///
/// let mut row = RuleRow::new();
/// row.insert("column".into(), CellValue::from("Salary"));
/// row.insert("Type".into(), CellValue::from("FLOAT"));
/// row.insert("Required".into(), CellValue::from(" yes "));
/// row.insert("Min".into(), CellValue::Integer(30000));
///
/// let rule = parse_rule(&row);
/// assert_eq!(rule.column_name, "Salary");
/// assert_eq!(rule.expected_type, ExpectedType::Float);
/// assert!(rule.required);
/// assert_eq!(rule.min, Some(30000.0));
/// assert_eq!(rule.max, None);
/// ```
pub fn parse_rule(row: &RuleRow) -> ColumnRule {
    let column_name = field_text(row, COLUMN_NAME_HEADER)
        .or_else(|| field_text(row, COLUMN_ALIAS_HEADER))
        .unwrap_or_default();

    ColumnRule {
        column_name,
        expected_type: field_text(row, TYPE_HEADER)
            .map(|text| ExpectedType::parse(&text))
            .unwrap_or_default(),
        required: field_text(row, REQUIRED_HEADER)
            .is_some_and(|text| text.trim().eq_ignore_ascii_case("yes")),
        min: field_number(row, MIN_HEADER),
        max: field_number(row, MAX_HEADER),
        pattern: field_text(row, REGEX_HEADER),
    }
}

/// Parses every row of a rule sheet, in row order.
pub fn parse_rules(table: &DataTable) -> Vec<ColumnRule> {
    rule_rows(table).iter().map(parse_rule).collect()
}

/// Splits a rule sheet into keyed rows, dropping missing cells.
pub fn rule_rows(table: &DataTable) -> Vec<RuleRow> {
    (0..table.rows())
        .map(|row| {
            table
                .columns()
                .iter()
                .filter_map(|column| {
                    table
                        .cell(column, row)
                        .map(|value| (column.clone(), value.clone()))
                })
                .collect()
        })
        .collect()
}

fn field<'a>(row: &'a RuleRow, key: &str) -> Option<&'a CellValue> {
    row.get(key).filter(|value| !value.is_missing())
}

fn field_text(row: &RuleRow, key: &str) -> Option<String> {
    field(row, key).map(ToString::to_string)
}

fn field_number(row: &RuleRow, key: &str) -> Option<f64> {
    let number = match field(row, key)? {
        CellValue::Integer(i) => *i as f64,
        CellValue::Float(f) => *f,
        CellValue::Bool(b) => f64::from(u8::from(*b)),
        CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
        CellValue::Date(_) => return None,
    };
    (!number.is_nan()).then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use srs_core::TableBuilder;

    fn row(fields: &[(&str, CellValue)]) -> RuleRow {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_parse_full_rule() {
        let rule = parse_rule(&row(&[
            ("Column Name", "Employee_ID".into()),
            ("Type", "string".into()),
            ("Required", "Yes".into()),
            ("Regex", r"^EMP\d{3}$".into()),
        ]));

        assert_eq!(
            rule,
            ColumnRule {
                column_name: "Employee_ID".to_string(),
                expected_type: ExpectedType::String,
                required: true,
                min: None,
                max: None,
                pattern: Some(r"^EMP\d{3}$".to_string()),
            }
        );
    }

    #[test]
    fn test_column_name_prefers_primary_header() {
        let rule = parse_rule(&row(&[
            ("Column Name", "Primary".into()),
            ("column", "Alias".into()),
        ]));
        assert_eq!(rule.column_name, "Primary");
    }

    #[test]
    fn test_column_name_falls_back_when_primary_empty() {
        let rule = parse_rule(&row(&[("Column Name", "".into()), ("column", "Alias".into())]));
        assert_eq!(rule.column_name, "Alias");
    }

    #[test]
    fn test_missing_column_name_is_empty() {
        let rule = parse_rule(&row(&[("Type", "int".into())]));
        assert_eq!(rule.column_name, "");
        assert_eq!(rule.expected_type, ExpectedType::Integer);
    }

    #[test]
    fn test_required_only_for_yes() {
        for (value, expected) in [
            (CellValue::from("YES"), true),
            (CellValue::from(" yes"), true),
            (CellValue::from("No"), false),
            (CellValue::from("y"), false),
            (CellValue::from("true"), false),
            (CellValue::Bool(true), false),
            (CellValue::from(""), false),
        ] {
            let rule = parse_rule(&row(&[("column", "c".into()), ("Required", value.clone())]));
            assert_eq!(rule.required, expected, "Required = {value:?}");
        }
    }

    #[test]
    fn test_bounds_from_numbers_and_text() {
        let rule = parse_rule(&row(&[
            ("column", "c".into()),
            ("Min", CellValue::Float(0.5)),
            ("Max", " 1e3 ".into()),
        ]));
        assert_eq!(rule.min, Some(0.5));
        assert_eq!(rule.max, Some(1000.0));
    }

    #[test]
    fn test_non_numeric_bounds_are_unset() {
        let rule = parse_rule(&row(&[
            ("column", "c".into()),
            ("Min", "thirty".into()),
            ("Max", CellValue::Float(f64::NAN)),
        ]));
        assert_eq!(rule.min, None);
        assert_eq!(rule.max, None);
    }

    #[test]
    fn test_unknown_type_is_unspecified() {
        let rule = parse_rule(&row(&[("column", "c".into()), ("Type", "varchar".into())]));
        assert_eq!(rule.expected_type, ExpectedType::Unspecified);
    }

    #[test]
    fn test_parse_rules_in_row_order() {
        let srs = TableBuilder::new("SRS")
            .column(
                "Column Name",
                vec![Some("Employee_ID".into()), Some("Salary".into()), None],
            )
            .column("Type", vec![Some("string".into()), Some("float".into()), None])
            .column(
                "Min",
                vec![None, Some(CellValue::Integer(30000)), Some(CellValue::Integer(1))],
            )
            .build()
            .unwrap();

        let rules = parse_rules(&srs);
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].column_name, "Employee_ID");
        assert_eq!(rules[1].column_name, "Salary");
        assert_eq!(rules[1].min, Some(30000.0));
        assert_eq!(rules[2].column_name, "");
        assert_eq!(rules[2].min, Some(1.0));
    }
}
