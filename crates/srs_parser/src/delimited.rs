//! CSV sheet reading with per-column type inference.
//!
//! Cells are read as text and then typed column by column: a column whose
//! present cells all parse as integers becomes an integer column, then float,
//! then boolean; anything else stays text exactly as written. A fixed set of
//! NA tokens is treated as missing.

use crate::{ParserError, Result};
use csv::ReaderBuilder;
use srs_core::{Cell, CellValue, DataTable};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use tracing::debug;

/// Tokens read as a missing cell.
pub(crate) const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_TOKENS: &[&str] = &["True", "TRUE", "true"];
const FALSE_TOKENS: &[&str] = &["False", "FALSE", "false"];

/// Reads a CSV sheet from any reader.
///
/// The first record is the header. Empty header cells are named
/// `Unnamed: <index>` and repeated names get a `.1`, `.2`, ... suffix so
/// column names stay unique. Short records are padded with missing cells;
/// long records are an error.
pub fn parse_csv<R: Read>(name: &str, reader: R) -> Result<DataTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = dedupe_headers(reader.headers()?.iter().map(str::to_string));
    let width = headers.len();
    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); width];

    for record in reader.records() {
        let record = record?;
        if record.len() > width {
            return Err(ParserError::MalformedRow {
                sheet: name.to_string(),
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                expected: width,
                actual: record.len(),
            });
        }
        for (idx, column) in raw_columns.iter_mut().enumerate() {
            column.push(record.get(idx).map(str::to_string));
        }
    }

    let columns: Vec<(String, Vec<Cell>)> = headers
        .into_iter()
        .zip(raw_columns)
        .map(|(header, raw)| (header, infer_column(raw)))
        .collect();

    let table = DataTable::from_columns(name, columns)?;
    debug!(
        sheet = name,
        rows = table.rows(),
        columns = table.column_count(),
        "CSV sheet parsed"
    );
    Ok(table)
}

/// Reads a CSV sheet from a string.
pub fn parse_csv_str(name: &str, content: &str) -> Result<DataTable> {
    parse_csv(name, content.as_bytes())
}

/// Names empty headers `Unnamed: <index>` and suffixes repeats with the
/// first `.N` not already taken, so `a,a.1,a` reads as `a,a.1,a.2`.
pub(crate) fn dedupe_headers(raw: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();

    for (idx, header) in raw.into_iter().enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header
        };

        let mut name = base.clone();
        if taken.contains(&name) {
            let n = suffixes.entry(base.clone()).or_insert(0);
            loop {
                *n += 1;
                let candidate = format!("{base}.{n}");
                if !taken.contains(&candidate) {
                    name = candidate;
                    break;
                }
            }
        }
        taken.insert(name.clone());
        names.push(name);
    }

    names
}

fn infer_column(raw: Vec<Option<String>>) -> Vec<Cell> {
    let raw: Vec<Option<String>> = raw
        .into_iter()
        .map(|cell| cell.filter(|s| !NA_TOKENS.contains(&s.as_str())))
        .collect();
    let present = || raw.iter().flatten();

    if present().all(|s| s.trim().parse::<i64>().is_ok()) {
        return convert(raw, |s| s.trim().parse().ok().map(CellValue::Integer));
    }
    if present().all(|s| s.trim().parse::<f64>().is_ok()) {
        return convert(raw, |s| s.trim().parse().ok().map(CellValue::Float));
    }
    if present().all(|s| parse_bool(s).is_some()) {
        return convert(raw, |s| parse_bool(s).map(CellValue::Bool));
    }
    raw.into_iter()
        .map(|cell| cell.map(CellValue::Text))
        .collect()
}

fn convert(raw: Vec<Option<String>>, parse: impl Fn(&str) -> Option<CellValue>) -> Vec<Cell> {
    raw.iter()
        .map(|cell| cell.as_deref().and_then(&parse))
        .collect()
}

fn parse_bool(s: &str) -> Option<bool> {
    if TRUE_TOKENS.contains(&s) {
        Some(true)
    } else if FALSE_TOKENS.contains(&s) {
        Some(false)
    } else {
        None
    }
}
