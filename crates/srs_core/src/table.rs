//! Table abstraction.
//!
//! This module provides the in-memory representation of one parsed sheet:
//! an ordered set of uniquely named columns, each an ordered sequence of
//! optionally missing cells.

use crate::{Result, TableError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// A single non-null cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Calendar date
    Date(NaiveDate),
    /// Free text, kept exactly as read
    Text(String),
}

impl CellValue {
    /// Returns true if this value counts as missing.
    ///
    /// Empty text and NaN floats are missing, the same as an absent cell.
    /// Whitespace is content: `"   "` is a present value.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Text(s) => s.is_empty(),
            CellValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Bool(_) => "bool",
            CellValue::Integer(_) => "integer",
            CellValue::Float(_) => "float",
            CellValue::Date(_) => "date",
            CellValue::Text(_) => "text",
        }
    }

    /// Attempts to get this value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts this value to JSON.
    ///
    /// Non-finite floats become `null` since JSON cannot carry them.
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Integer(i) => Value::from(*i),
            CellValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Date(d) => Value::String(d.to_string()),
            CellValue::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

/// A cell slot: `None` when the sheet has no value there.
pub type Cell = Option<CellValue>;

/// Returns true if a cell slot is missing (absent, null or empty).
pub fn is_missing(cell: Option<&CellValue>) -> bool {
    cell.is_none_or(CellValue::is_missing)
}

/// One named sheet of tabular data.
///
/// Storage is column-oriented; every column holds exactly `rows` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    name: String,
    columns: Vec<String>,
    data: Vec<Vec<Cell>>,
    rows: usize,
}

impl DataTable {
    /// Creates a sheet with no columns and no rows.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            data: Vec::new(),
            rows: 0,
        }
    }

    /// Creates a sheet from named columns.
    ///
    /// The row count is taken from the first column; every other column
    /// must have the same length.
    pub fn from_columns(
        name: impl Into<String>,
        columns: Vec<(String, Vec<Cell>)>,
    ) -> Result<Self> {
        let name = name.into();
        let rows = columns.first().map(|(_, values)| values.len()).unwrap_or(0);
        let mut seen = HashSet::new();
        let mut names = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());

        for (column, values) in columns {
            if !seen.insert(column.clone()) {
                return Err(TableError::DuplicateColumn {
                    sheet: name,
                    column,
                });
            }
            if values.len() != rows {
                return Err(TableError::RaggedColumn {
                    sheet: name,
                    column,
                    expected: rows,
                    actual: values.len(),
                });
            }
            names.push(column);
            data.push(values);
        }

        Ok(Self {
            name,
            columns: names,
            data,
            rows,
        })
    }

    /// Creates a sheet from a header row and data rows.
    pub fn from_rows(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self> {
        let name = name.into();
        let row_count = rows.len();
        let mut data: Vec<Vec<Cell>> = headers
            .iter()
            .map(|_| Vec::with_capacity(row_count))
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                return Err(TableError::RaggedRow {
                    sheet: name,
                    row: row_idx,
                    expected: headers.len(),
                    actual: row.len(),
                });
            }
            for (column, cell) in data.iter_mut().zip(row) {
                column.push(cell);
            }
        }

        let mut table = Self::from_columns(name, headers.into_iter().zip(data).collect())?;
        table.rows = row_count;
        Ok(table)
    }

    /// Returns the sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column names in sheet order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the sheet has a column with this exact name.
    pub fn has_column(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// Returns all cells of a column, or `None` if the column is absent.
    pub fn column(&self, column: &str) -> Option<&[Cell]> {
        self.position(column).map(|idx| self.data[idx].as_slice())
    }

    /// Returns a cell, or `None` if it is missing or out of range.
    pub fn cell(&self, column: &str, row: usize) -> Option<&CellValue> {
        self.column(column)?
            .get(row)?
            .as_ref()
            .filter(|value| !value.is_missing())
    }

    /// Iterates over the non-missing values of a column.
    ///
    /// Yields nothing if the column is absent.
    pub fn present_values<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a CellValue> {
        self.column(column)
            .unwrap_or_default()
            .iter()
            .filter_map(|cell| cell.as_ref().filter(|value| !value.is_missing()))
    }

    /// Returns the first `n` rows as JSON records keyed by column name.
    ///
    /// Missing cells are rendered as `null`.
    pub fn head_records(&self, n: usize) -> Vec<Map<String, Value>> {
        (0..self.rows.min(n))
            .map(|row| {
                self.columns
                    .iter()
                    .zip(&self.data)
                    .map(|(name, values)| {
                        let value = values[row]
                            .as_ref()
                            .filter(|value| !value.is_missing())
                            .map(CellValue::to_json)
                            .unwrap_or(Value::Null);
                        (name.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }
}

/// An ordered collection of named sheets, as produced by ingestion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<DataTable>,
}

impl Workbook {
    /// Creates an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sheet, rejecting duplicate names.
    pub fn add_sheet(&mut self, sheet: DataTable) -> Result<()> {
        if self.sheet(sheet.name()).is_some() {
            return Err(TableError::DuplicateSheet(sheet.name().to_string()));
        }
        self.sheets.push(sheet);
        Ok(())
    }

    /// Looks up a sheet by exact name.
    pub fn sheet(&self, name: &str) -> Option<&DataTable> {
        self.sheets.iter().find(|sheet| sheet.name() == name)
    }

    /// Returns the sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(DataTable::name).collect()
    }

    /// Iterates over the sheets in workbook order.
    pub fn sheets(&self) -> impl Iterator<Item = &DataTable> {
        self.sheets.iter()
    }

    /// Returns the number of sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Returns true if the workbook has no sheets.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
