//! Value coercion used by the type and bound checks.
//!
//! Two policies live here. Numeric coercion for the min/max checks is
//! all-or-nothing: if any present value cannot be read as a number, the
//! bound checks do not apply to that column at all. Date parsing is
//! permissive and accepts the common written forms of a calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use srs_core::CellValue;

/// Date-time layouts tried before plain dates.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date layouts. Month-first is tried before day-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%y",
    "%d/%m/%y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Result of coercing a column's present values for the bound checks.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundCoercion {
    /// Every present value converted
    Numeric(Vec<f64>),
    /// At least one present value has no numeric reading
    NotCoercible,
}

impl BoundCoercion {
    /// Coerces every value, or reports that the column is not numeric.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Self {
        values
            .into_iter()
            .map(to_number)
            .collect::<Option<Vec<_>>>()
            .map_or(Self::NotCoercible, Self::Numeric)
    }
}

/// Reads a cell as a number for the bound checks.
///
/// Integers and floats convert directly, booleans become 0 or 1 and text is
/// parsed after trimming. Dates have no numeric reading.
pub fn to_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Integer(i) => Some(*i as f64),
        CellValue::Float(f) => Some(*f),
        CellValue::Bool(b) => Some(f64::from(u8::from(*b))),
        CellValue::Text(s) => s.trim().parse().ok(),
        CellValue::Date(_) => None,
    }
}

/// Returns true if a value is a whole number.
pub fn is_integer_value(value: &CellValue) -> bool {
    match value {
        CellValue::Integer(_) => true,
        CellValue::Float(f) => f.is_finite() && f.fract() == 0.0,
        _ => false,
    }
}

/// Returns true if a value is numeric.
pub fn is_float_value(value: &CellValue) -> bool {
    matches!(value, CellValue::Integer(_) | CellValue::Float(_))
}

/// Returns true if a value reads as a calendar date.
///
/// Numbers are accepted as epoch offsets; text must parse with
/// [`parse_date`].
pub fn is_date_value(value: &CellValue) -> bool {
    match value {
        CellValue::Date(_) | CellValue::Integer(_) => true,
        CellValue::Float(f) => f.is_finite(),
        CellValue::Text(s) => parse_date(s).is_some(),
        CellValue::Bool(_) => false,
    }
}

/// Parses text as a date, trying RFC 3339, RFC 2822 and a list of common
/// layouts. Any time-of-day part is dropped.
///
/// # Example
///
/// ```rust
/// use srs_validator::parse_date;
///
/// assert!(parse_date("2023-01-15").is_some());
/// assert!(parse_date("Jan 15, 2023").is_some());
/// assert!(parse_date("not-a-date").is_none());
/// ```
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_forms() {
        assert_eq!(parse_date("2023-01-15"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date(" 2023/01/15 "), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("01/15/2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("15/01/2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("15.01.2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("15 Jan 2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("January 15, 2023"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("2023-01-15 08:30:00"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("2023-01-15T08:30:00Z"), Some(ymd(2023, 1, 15)));
        assert_eq!(parse_date("Sun, 15 Jan 2023 08:30:00 +0000"), Some(ymd(2023, 1, 15)));
    }

    #[test]
    fn test_parse_date_rejects() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date("EMP001"), None);
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&CellValue::Integer(3)), Some(3.0));
        assert_eq!(to_number(&CellValue::Bool(true)), Some(1.0));
        assert_eq!(to_number(&CellValue::from(" 2.5 ")), Some(2.5));
        assert_eq!(to_number(&CellValue::from("abc")), None);
        assert_eq!(to_number(&CellValue::Date(ymd(2023, 1, 1))), None);
    }

    #[test]
    fn test_bound_coercion_all_or_nothing() {
        let values = [CellValue::Integer(1), CellValue::from("2")];
        assert_eq!(
            BoundCoercion::from_values(&values),
            BoundCoercion::Numeric(vec![1.0, 2.0])
        );

        let values = [CellValue::Integer(1), CellValue::from("two")];
        assert_eq!(BoundCoercion::from_values(&values), BoundCoercion::NotCoercible);

        assert_eq!(
            BoundCoercion::from_values(&[]),
            BoundCoercion::Numeric(vec![])
        );
    }

    #[test]
    fn test_integer_values() {
        assert!(is_integer_value(&CellValue::Integer(-4)));
        assert!(is_integer_value(&CellValue::Float(3.0)));
        assert!(!is_integer_value(&CellValue::Float(3.5)));
        assert!(!is_integer_value(&CellValue::Float(f64::INFINITY)));
        assert!(!is_integer_value(&CellValue::from("3")));
        assert!(!is_integer_value(&CellValue::Bool(true)));
    }

    #[test]
    fn test_date_values() {
        assert!(is_date_value(&CellValue::Date(ymd(2023, 1, 1))));
        assert!(is_date_value(&CellValue::Integer(1_673_740_800)));
        assert!(is_date_value(&CellValue::from("2023-01-15")));
        assert!(!is_date_value(&CellValue::from("tomorrow-ish")));
        assert!(!is_date_value(&CellValue::Bool(false)));
    }
}
