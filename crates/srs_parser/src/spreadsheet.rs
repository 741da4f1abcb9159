//! Excel and OpenDocument workbook reading.
//!
//! Every worksheet becomes one sheet, in workbook order. The first row is the
//! header, named the same way as CSV headers. Cells keep the type the
//! spreadsheet stored them with; whole numbers read as integers.

use crate::delimited::{NA_TOKENS, dedupe_headers};
use crate::{ParserError, Result};
use calamine::{Data, DataType, Reader, open_workbook_auto};
use srs_core::{Cell, CellValue, DataTable, Workbook};
use std::path::Path;
use tracing::debug;

/// Largest magnitude at which an `f64` still holds every whole number.
const MAX_EXACT_WHOLE: f64 = 9_007_199_254_740_992.0;

/// Reads every worksheet of an `.xlsx`, `.xlsm`, `.xlsb`, `.xls` or `.ods` file.
///
/// # Errors
///
/// Returns `ParserError::Spreadsheet` if the file cannot be opened or a
/// worksheet cannot be read, and `ParserError::EmptyWorkbook` if the file
/// has no worksheets.
pub fn parse_spreadsheet(path: &Path) -> Result<Workbook> {
    let mut spreadsheet = open_workbook_auto(path)?;
    let names = spreadsheet.sheet_names();
    if names.is_empty() {
        return Err(ParserError::EmptyWorkbook(path.display().to_string()));
    }

    let mut workbook = Workbook::new();
    for name in names {
        let range = spreadsheet.worksheet_range(&name)?;
        let mut rows = range.rows();

        let table = match rows.next() {
            Some(header) => {
                let headers = dedupe_headers(header.iter().map(header_text));
                let records: Vec<Vec<Cell>> = rows
                    .map(|row| row.iter().map(to_cell).collect())
                    .collect();
                DataTable::from_rows(name.as_str(), headers, records)?
            }
            None => DataTable::empty(name.as_str()),
        };

        debug!(
            sheet = %name,
            rows = table.rows(),
            columns = table.column_count(),
            "Worksheet parsed"
        );
        workbook.add_sheet(table)?;
    }

    Ok(workbook)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => whole_number(*f).map_or_else(|| f.to_string(), |i| i.to_string()),
        other => other.to_string(),
    }
}

fn to_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => None,
        Data::String(s) => (!NA_TOKENS.contains(&s.as_str())).then(|| CellValue::Text(s.clone())),
        Data::Int(i) => Some(CellValue::Integer(*i)),
        Data::Float(f) => Some(whole_number(*f).map_or(CellValue::Float(*f), CellValue::Integer)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::DateTime(_) | Data::DateTimeIso(_) => Some(
            cell.as_date()
                .map_or_else(|| CellValue::Text(cell.to_string()), CellValue::Date),
        ),
        Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(e) => {
            let text = e.to_string();
            (!NA_TOKENS.contains(&text.as_str())).then_some(CellValue::Text(text))
        }
    }
}

fn whole_number(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f.abs() < MAX_EXACT_WHOLE).then_some(f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    #[test]
    fn test_reads_every_worksheet() {
        let workbook = parse_spreadsheet(&fixture("company.xlsx")).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Employee", "Departments"]);

        let employees = workbook.sheet("Employee").unwrap();
        assert_eq!(employees.rows(), 3);
        assert_eq!(
            employees.columns(),
            &["Employee_ID", "Salary", "Department", "Join_Date"].map(String::from)
        );
        assert_eq!(employees.cell("Employee_ID", 0), Some(&CellValue::from("EMP001")));
        assert_eq!(employees.cell("Salary", 1), Some(&CellValue::Integer(25000)));
        assert_eq!(employees.cell("Department", 1), None);
        assert_eq!(
            employees.cell("Join_Date", 0),
            Some(&CellValue::Date(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()))
        );

        let departments = workbook.sheet("Departments").unwrap();
        assert_eq!(departments.rows(), 2);
        assert_eq!(departments.cell("Headcount", 0), Some(&CellValue::Integer(12)));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_spreadsheet(&fixture("no_such_book.xlsx")).unwrap_err();
        assert!(matches!(err, ParserError::Spreadsheet(_)));
    }

    #[test]
    fn test_cell_mapping() {
        assert_eq!(to_cell(&Data::Empty), None);
        assert_eq!(to_cell(&Data::String("NA".into())), None);
        assert_eq!(to_cell(&Data::String("   ".into())), Some(CellValue::from("   ")));
        assert_eq!(to_cell(&Data::Float(45000.0)), Some(CellValue::Integer(45000)));
        assert_eq!(to_cell(&Data::Float(0.5)), Some(CellValue::Float(0.5)));
        assert_eq!(to_cell(&Data::Bool(true)), Some(CellValue::Bool(true)));
        assert_eq!(to_cell(&Data::Error(CellErrorType::NA)), None);
        assert_eq!(
            to_cell(&Data::Error(CellErrorType::Div0)),
            Some(CellValue::from("#DIV/0!"))
        );
    }

    #[test]
    fn test_header_text() {
        assert_eq!(header_text(&Data::Empty), "");
        assert_eq!(header_text(&Data::Float(2024.0)), "2024");
        assert_eq!(
            dedupe_headers([Data::String("a".into()), Data::Empty, Data::String("a".into())]
                .iter()
                .map(header_text)),
            vec!["a", "Unnamed: 1", "a.1"]
        );
    }
}
