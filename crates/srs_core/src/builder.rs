//! Builder pattern for rules and tables.
//!
//! This module provides fluent builders for assembling rules and sheets in
//! code, mostly from adapters and tests.

use crate::{Cell, ColumnRule, DataTable, ExpectedType, Result};

/// Builder for creating a `ColumnRule`.
///
/// # Example
///
/// ```rust
/// use srs_core::{ExpectedType, RuleBuilder};
///
/// let rule = RuleBuilder::new("Employee_ID")
///     .expected_type(ExpectedType::String)
///     .required(true)
///     .pattern(r"^EMP\d{3}$")
///     .build();
///
/// assert!(rule.required);
/// ```
#[derive(Debug)]
pub struct RuleBuilder {
    rule: ColumnRule,
}

impl RuleBuilder {
    /// Creates a rule builder for a column.
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            rule: ColumnRule::new(column_name),
        }
    }

    /// Sets the expected type.
    pub fn expected_type(mut self, expected_type: ExpectedType) -> Self {
        self.rule.expected_type = expected_type;
        self
    }

    /// Sets whether the column is required.
    pub fn required(mut self, required: bool) -> Self {
        self.rule.required = required;
        self
    }

    /// Sets the lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.rule.min = Some(min);
        self
    }

    /// Sets the upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.rule.max = Some(max);
        self
    }

    /// Sets both bounds.
    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    /// Sets the pattern.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.rule.pattern = Some(pattern.into());
        self
    }

    /// Builds the rule.
    pub fn build(self) -> ColumnRule {
        self.rule
    }
}

/// Builder for creating a `DataTable` column by column.
///
/// # Example
///
/// ```rust
/// use srs_core::{CellValue, TableBuilder};
///
/// let table = TableBuilder::new("Employees")
///     .column("Department", vec![Some(CellValue::from("HR")), None])
///     .build()
///     .unwrap();
///
/// assert_eq!(table.rows(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TableBuilder {
    name: String,
    columns: Vec<(String, Vec<Cell>)>,
}

impl TableBuilder {
    /// Creates a table builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Adds a column.
    pub fn column(mut self, name: impl Into<String>, values: Vec<Cell>) -> Self {
        self.columns.push((name.into(), values));
        self
    }

    /// Adds a column from present values; none of its cells is absent.
    pub fn values<V>(self, name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<crate::CellValue>,
    {
        let cells = values.into_iter().map(|v| Some(v.into())).collect();
        self.column(name, cells)
    }

    /// Builds the table.
    ///
    /// # Errors
    ///
    /// Fails on duplicate column names or columns of different lengths.
    pub fn build(self) -> Result<DataTable> {
        DataTable::from_columns(self.name, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellValue;

    #[test]
    fn test_rule_builder_defaults() {
        let rule = RuleBuilder::new("id").build();
        assert_eq!(rule.column_name, "id");
        assert_eq!(rule.expected_type, ExpectedType::Unspecified);
        assert!(!rule.required);
        assert!(rule.min.is_none() && rule.max.is_none() && rule.pattern.is_none());
    }

    #[test]
    fn test_rule_builder_range() {
        let rule = RuleBuilder::new("Salary").range(30000.0, 500000.0).build();
        assert_eq!(rule.min, Some(30000.0));
        assert_eq!(rule.max, Some(500000.0));
    }

    #[test]
    fn test_table_builder_values() {
        let table = TableBuilder::new("S")
            .values("n", [1_i64, 2, 3])
            .values("s", ["a", "b", "c"])
            .build()
            .unwrap();

        assert_eq!(table.rows(), 3);
        assert_eq!(table.columns(), &["n".to_string(), "s".to_string()]);
        assert_eq!(table.cell("n", 2), Some(&CellValue::Integer(3)));
    }
}
