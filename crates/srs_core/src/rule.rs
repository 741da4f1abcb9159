//! Rule model.
//!
//! A rule sheet holds one row per expected column. Each row is parsed once,
//! up front, into a [`ColumnRule`] so the engine works over typed values
//! instead of loose field lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type a column's values are expected to have.
///
/// Parsed case-insensitively from the free-text `Type` cell of a rule row.
/// Values that are not recognized map to [`ExpectedType::Unspecified`], which
/// disables the type check for that column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedType {
    /// Free text; no type check is performed
    String,
    /// Whole numbers
    Integer,
    /// Any numeric value, integer or decimal
    Float,
    /// Calendar dates
    Date,
    /// No recognizable type was given
    #[default]
    Unspecified,
}

impl ExpectedType {
    /// Parses a type name from a rule sheet.
    ///
    /// Never fails: anything other than `int`/`integer`, `float`, `date` or
    /// `string` yields `Unspecified`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use srs_core::ExpectedType;
    ///
    /// assert_eq!(ExpectedType::parse("Integer"), ExpectedType::Integer);
    /// assert_eq!(ExpectedType::parse(" FLOAT "), ExpectedType::Float);
    /// assert_eq!(ExpectedType::parse("decimal(10,2)"), ExpectedType::Unspecified);
    /// ```
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "int" | "integer" => Self::Integer,
            "float" => Self::Float,
            "date" => Self::Date,
            "string" => Self::String,
            _ => Self::Unspecified,
        }
    }

    /// Returns true if a type check runs for this type.
    pub fn is_checked(&self) -> bool {
        !matches!(self, Self::String | Self::Unspecified)
    }

    /// Lower-case name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Date => "date",
            Self::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column-level constraint, parsed from a rule sheet row.
///
/// A rule whose `min` is greater than its `max` is accepted as-is; it is
/// simply a range no value can satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRule {
    /// Name of the data column this rule targets
    pub column_name: String,

    /// Expected value type
    pub expected_type: ExpectedType,

    /// Whether every cell of the column must be present
    pub required: bool,

    /// Inclusive lower bound
    pub min: Option<f64>,

    /// Inclusive upper bound
    pub max: Option<f64>,

    /// Regular expression values should match.
    ///
    /// Carried for forward compatibility; the engine does not evaluate it.
    pub pattern: Option<String>,
}

impl ColumnRule {
    /// Creates an unconstrained rule for a column.
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            expected_type: ExpectedType::Unspecified,
            required: false,
            min: None,
            max: None,
            pattern: None,
        }
    }

    /// Returns true if both bounds are set and no value can satisfy them.
    pub fn has_inverted_range(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}
