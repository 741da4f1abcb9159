//! YAML and TOML rule documents.
//!
//! A rule document holds any number of sheets, each a list of records:
//!
//! ```yaml
//! sheets:
//!   Employees:
//!     - Column Name: Salary
//!       Type: float
//!       Min: 30000
//! ```
//!
//! Sheet order and column order follow the document. A record that lacks a
//! column another record has gets a missing cell there.

use crate::{ParserError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use srs_core::{Cell, CellValue, DataTable, Workbook};

/// Sheet records before they are assembled into a table.
type Records = Vec<Vec<(String, Cell)>>;

#[derive(Debug, Deserialize)]
struct YamlDocument {
    sheets: serde_json::Map<String, Value>,
}

/// Parses a YAML rule document.
pub fn parse_yaml_workbook(content: &str) -> Result<Workbook> {
    let document: YamlDocument = serde_yaml_ng::from_str(content)?;

    let mut sheets = Vec::with_capacity(document.sheets.len());
    for (name, rows) in document.sheets {
        let rows = match rows {
            Value::Array(rows) => rows,
            Value::Null => Vec::new(),
            other => {
                return Err(ParserError::InvalidDocument(format!(
                    "sheet '{name}' must be a list of records, found {}",
                    json_kind(&other)
                )));
            }
        };
        let records = rows
            .into_iter()
            .map(|row| match row {
                Value::Object(fields) => fields
                    .into_iter()
                    .map(|(key, value)| json_cell(&name, &key, value).map(|cell| (key, cell)))
                    .collect::<Result<Vec<_>>>(),
                other => Err(ParserError::InvalidDocument(format!(
                    "sheet '{name}' has a {} where a record was expected",
                    json_kind(&other)
                ))),
            })
            .collect::<Result<Records>>()?;
        sheets.push((name, records));
    }

    assemble(sheets)
}

/// Parses a TOML rule document.
///
/// TOML dates without a time become date cells; other datetimes are kept as
/// text.
pub fn parse_toml_workbook(content: &str) -> Result<Workbook> {
    let mut document: toml::Table =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;

    let sheets = match document.remove("sheets") {
        Some(toml::Value::Table(sheets)) => sheets,
        Some(other) => {
            return Err(ParserError::InvalidDocument(format!(
                "'sheets' must be a table, found {}",
                other.type_str()
            )));
        }
        None => return Err(ParserError::InvalidDocument("missing 'sheets' table".into())),
    };

    let mut parsed = Vec::with_capacity(sheets.len());
    for (name, rows) in sheets {
        let toml::Value::Array(rows) = rows else {
            return Err(ParserError::InvalidDocument(format!(
                "sheet '{name}' must be an array of tables, found {}",
                rows.type_str()
            )));
        };
        let records = rows
            .into_iter()
            .map(|row| match row {
                toml::Value::Table(fields) => fields
                    .into_iter()
                    .map(|(key, value)| toml_cell(&name, &key, value).map(|cell| (key, cell)))
                    .collect::<Result<Vec<_>>>(),
                other => Err(ParserError::InvalidDocument(format!(
                    "sheet '{name}' has a {} where a table was expected",
                    other.type_str()
                ))),
            })
            .collect::<Result<Records>>()?;
        parsed.push((name, records));
    }

    assemble(parsed)
}

fn assemble(sheets: Vec<(String, Records)>) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    for (name, records) in sheets {
        workbook.add_sheet(table_from_records(name, records)?)?;
    }
    Ok(workbook)
}

fn table_from_records(name: String, records: Records) -> Result<DataTable> {
    let mut headers: Vec<String> = Vec::new();
    for record in &records {
        for (key, _) in record {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .into_iter()
        .map(|record| {
            let mut row: Vec<Cell> = vec![None; headers.len()];
            for (key, cell) in record {
                if let Some(idx) = headers.iter().position(|h| *h == key) {
                    row[idx] = cell;
                }
            }
            row
        })
        .collect();

    Ok(DataTable::from_rows(name, headers, rows)?)
}

fn json_cell(sheet: &str, key: &str, value: Value) -> Result<Cell> {
    Ok(match value {
        Value::Null => None,
        Value::Bool(b) => Some(CellValue::Bool(b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(CellValue::Integer(i)),
            None => n.as_f64().map(CellValue::Float),
        },
        Value::String(s) => Some(CellValue::Text(s)),
        other => {
            return Err(ParserError::InvalidDocument(format!(
                "sheet '{sheet}' field '{key}' must be a scalar, found {}",
                json_kind(&other)
            )));
        }
    })
}

fn toml_cell(sheet: &str, key: &str, value: toml::Value) -> Result<Cell> {
    Ok(Some(match value {
        toml::Value::String(s) => CellValue::Text(s),
        toml::Value::Integer(i) => CellValue::Integer(i),
        toml::Value::Float(f) => CellValue::Float(f),
        toml::Value::Boolean(b) => CellValue::Bool(b),
        toml::Value::Datetime(dt) => match (dt.date, dt.time) {
            (Some(date), None) => NaiveDate::from_ymd_opt(
                i32::from(date.year),
                u32::from(date.month),
                u32::from(date.day),
            )
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(dt.to_string())),
            _ => CellValue::Text(dt.to_string()),
        },
        other => {
            return Err(ParserError::InvalidDocument(format!(
                "sheet '{sheet}' field '{key}' must be a scalar, found {}",
                other.type_str()
            )));
        }
    }))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
