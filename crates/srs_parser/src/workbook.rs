//! Workbook loading with format detection.

use crate::{
    ParserError, Result, parse_csv, parse_spreadsheet, parse_toml_workbook, parse_yaml_workbook,
};
use srs_core::Workbook;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// Sheet name given to a standalone CSV file.
pub const CSV_SHEET_NAME: &str = "Sheet1";

/// Supported workbook sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Single CSV file (.csv)
    Csv,
    /// Directory of CSV files, one sheet per file
    CsvDirectory,
    /// Spreadsheet workbook (.xlsx, .xlsm, .xlsb, .xls, .ods), one sheet per worksheet
    Excel,
    /// YAML rule document (.yml, .yaml)
    Yaml,
    /// TOML rule document (.toml)
    Toml,
}

/// Detects the workbook format of a path.
///
/// Directories are read as CSV workbooks; files are classified by extension.
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if a file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<SheetFormat> {
    if path.is_dir() {
        return Ok(SheetFormat::CsvDirectory);
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "csv" => Ok(SheetFormat::Csv),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SheetFormat::Excel),
        "yaml" | "yml" => Ok(SheetFormat::Yaml),
        "toml" => Ok(SheetFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Loads every sheet from a path, with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use srs_parser::load_workbook;
/// use std::path::Path;
///
/// let workbook = load_workbook(Path::new("srs/employees.yml")).unwrap();
/// for name in workbook.sheet_names() {
///     println!("sheet: {name}");
/// }
/// ```
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    let format = detect_format(path)?;

    let workbook = match format {
        SheetFormat::Csv => {
            let file = BufReader::new(File::open(path)?);
            let mut workbook = Workbook::new();
            workbook.add_sheet(parse_csv(CSV_SHEET_NAME, file)?)?;
            workbook
        }
        SheetFormat::CsvDirectory => load_csv_directory(path)?,
        SheetFormat::Excel => parse_spreadsheet(path)?,
        SheetFormat::Yaml => parse_yaml_workbook(&std::fs::read_to_string(path)?)?,
        SheetFormat::Toml => parse_toml_workbook(&std::fs::read_to_string(path)?)?,
    };

    info!(
        path = %path.display(),
        sheets = workbook.len(),
        "Loaded workbook: {}",
        workbook.sheet_names().join(", ")
    );
    Ok(workbook)
}

fn load_csv_directory(dir: &Path) -> Result<Workbook> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(ParserError::EmptyWorkbook(dir.display().to_string()));
    }

    let mut workbook = Workbook::new();
    for file in files {
        let name = file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or(ParserError::InvalidExtension)?
            .to_string();
        let reader = BufReader::new(File::open(&file)?);
        workbook.add_sheet(parse_csv(&name, reader)?)?;
    }
    Ok(workbook)
}
