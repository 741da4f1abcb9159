//! Individual column checks.
//!
//! Each check looks at one rule and one column and yields at most one
//! finding. The engine runs them in a fixed order.

use crate::{BoundCoercion, is_date_value, is_float_value, is_integer_value};
use srs_core::{
    CellValue, ColumnRule, EXPECTED_FLOAT, EXPECTED_INTEGER, ExpectedType, INVALID_DATE,
    ValidationFinding, is_missing,
};

/// Outcome of a min or max check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundOutcome {
    /// No bound configured
    NotConfigured,
    /// The column is not numeric, so the bound does not apply
    Skipped,
    /// Every value is within the bound
    Within,
    /// At least one value is out of bounds
    Violated,
}

/// Checks that a required column has no missing cells.
pub fn check_required(rule: &ColumnRule, cells: &[Option<CellValue>]) -> Option<ValidationFinding> {
    let any_missing = cells.iter().any(|cell| is_missing(cell.as_ref()));
    (rule.required && any_missing).then(|| ValidationFinding::missing_required(&rule.column_name))
}

/// Checks the present values against the rule's expected type.
///
/// `String` and `Unspecified` never produce a finding.
pub fn check_type(rule: &ColumnRule, values: &[&CellValue]) -> Option<ValidationFinding> {
    let (valid, message) = match rule.expected_type {
        ExpectedType::Integer => (values.iter().all(|v| is_integer_value(v)), EXPECTED_INTEGER),
        ExpectedType::Float => (values.iter().all(|v| is_float_value(v)), EXPECTED_FLOAT),
        ExpectedType::Date => (values.iter().all(|v| is_date_value(v)), INVALID_DATE),
        ExpectedType::String | ExpectedType::Unspecified => return None,
    };

    (!valid).then(|| ValidationFinding::new(&rule.column_name, message))
}

/// Evaluates the lower bound.
pub fn min_outcome(min: Option<f64>, coercion: &BoundCoercion) -> BoundOutcome {
    bound_outcome(min, coercion, |value, min| value < min)
}

/// Evaluates the upper bound.
pub fn max_outcome(max: Option<f64>, coercion: &BoundCoercion) -> BoundOutcome {
    bound_outcome(max, coercion, |value, max| value > max)
}

fn bound_outcome(
    bound: Option<f64>,
    coercion: &BoundCoercion,
    violates: impl Fn(f64, f64) -> bool,
) -> BoundOutcome {
    let Some(bound) = bound else {
        return BoundOutcome::NotConfigured;
    };
    match coercion {
        BoundCoercion::NotCoercible => BoundOutcome::Skipped,
        BoundCoercion::Numeric(numbers) if numbers.iter().any(|&n| violates(n, bound)) => {
            BoundOutcome::Violated
        }
        BoundCoercion::Numeric(_) => BoundOutcome::Within,
    }
}
