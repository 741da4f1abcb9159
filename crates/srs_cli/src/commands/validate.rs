use anyhow::{Context, Result, bail};
use serde_json::json;
use srs_assistant::{Assistant, Completion};
use srs_core::Workbook;
use srs_parser::{SheetFormat, detect_format, load_workbook};
use srs_store::{JsonlStore, ResultStore, SheetInfo};
use srs_validator::{SheetMatcher, SheetOutcome, validate_workbook};
use std::path::Path;
use tracing::info;

use crate::config::AppConfig;
use crate::output;

pub struct ValidateOptions<'a> {
    pub srs_path: &'a str,
    pub data_path: &'a str,
    pub format: &'a str,
    pub explain: bool,
    pub summarize: bool,
    pub store_dir: Option<&'a str>,
    pub no_store: bool,
    pub cutoff: Option<f64>,
    pub config_path: Option<&'a str>,
}

pub async fn execute(options: ValidateOptions<'_>) -> Result<()> {
    info!("Validating {} against {}", options.data_path, options.srs_path);

    let config = AppConfig::load(options.config_path)?;
    let json = options.format == "json";

    let srs = load_workbook(Path::new(options.srs_path))
        .with_context(|| format!("Failed to load SRS file: {}", options.srs_path))?;
    let data = load_workbook(Path::new(options.data_path))
        .with_context(|| format!("Failed to load data file: {}", options.data_path))?;

    let cutoff = options.cutoff.unwrap_or(config.matching.cutoff);
    if !(0.0..=1.0).contains(&cutoff) {
        bail!("Cutoff must be between 0 and 1, got {}", cutoff);
    }
    let matcher = SheetMatcher::new(cutoff);

    let opened = open_store(&options, &config);
    let store = opened.as_deref();
    // None if the upload could not be recorded; results are stored either way
    let file_id = store.and_then(|store| record_upload(store, Path::new(options.data_path), &data));

    let assistant = if options.explain || options.summarize {
        connect_assistant(&config)
    } else {
        None
    };

    let outcomes = validate_workbook(&srs, &data, &matcher);
    let mut entries = Vec::with_capacity(outcomes.len());
    let mut failed_sheets = 0;

    for outcome in &outcomes {
        let sheet = outcome.sheet();
        let (rule_sheet, report) = match outcome {
            SheetOutcome::Validated {
                rule_sheet, report, ..
            } => (Some(rule_sheet.as_str()), Some(report)),
            SheetOutcome::Unmatched { .. } => (None, None),
        };

        if !json {
            output::print_sheet_header(sheet, rule_sheet);
        }
        if rule_sheet.is_none() {
            output::print_warning(&format!(
                "No matching SRS sheet found for '{}'",
                sheet.name()
            ));
        }

        let mut explanation = None;
        if let Some(report) = report {
            if !json {
                output::print_text_report(report);
            }
            if !report.passed() {
                failed_sheets += 1;
            }

            if let Some(store) = store {
                if let Err(e) = store.store_validation(file_id.as_deref(), sheet.name(), report) {
                    output::print_warning(&format!("Could not store validation results: {}", e));
                }
            }

            if options.explain && !report.passed() {
                if let Some(assistant) = &assistant {
                    let result = assistant
                        .explain_findings(sheet.name(), &report.findings)
                        .await;
                    explanation = accept_completion(result, store, file_id.as_deref(), sheet.name());
                }
                if let Some(text) = explanation.as_deref().filter(|_| !json) {
                    output::print_completion("AI-powered explanation:", text);
                }
            }
        }

        let mut data_summary = None;
        if options.summarize {
            if let Some(assistant) = &assistant {
                let result = assistant.summarize_sheet(sheet).await;
                data_summary = accept_completion(result, store, file_id.as_deref(), sheet.name());
            }
            if let Some(text) = data_summary.as_deref().filter(|_| !json) {
                output::print_completion("AI data analysis:", text);
            }
        }

        if json {
            entries.push(output::sheet_json(
                sheet,
                rule_sheet,
                report,
                explanation.as_deref(),
                data_summary.as_deref(),
            ));
        }
    }

    if json {
        output::print_json(&json!({
            "passed": failed_sheets == 0,
            "file_id": file_id,
            "sheets": entries,
        }));
    } else if failed_sheets == 0 {
        println!();
        output::print_success("All matched sheets passed validation");
    } else {
        println!();
        output::print_error(&format!("{} sheet(s) failed validation", failed_sheets));
    }

    if failed_sheets > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Opens the history store unless recording is turned off.
///
/// A store that cannot be opened only costs the history, not the run.
fn open_store(options: &ValidateOptions<'_>, config: &AppConfig) -> Option<Box<dyn ResultStore>> {
    if options.no_store || (!config.store.enabled && options.store_dir.is_none()) {
        return None;
    }

    let dir = config.store_dir(options.store_dir);
    match JsonlStore::open(dir.clone()) {
        Ok(store) => Some(Box::new(store)),
        Err(e) => {
            output::print_warning(&format!(
                "History disabled, could not open {}: {}",
                dir.display(),
                e
            ));
            None
        }
    }
}

fn record_upload(store: &dyn ResultStore, path: &Path, data: &Workbook) -> Option<String> {
    let file_type = match detect_format(path) {
        Ok(SheetFormat::Csv) => "text/csv",
        Ok(SheetFormat::CsvDirectory) => "inode/directory",
        Ok(SheetFormat::Excel) => spreadsheet_mime(path),
        Ok(SheetFormat::Yaml) => "application/yaml",
        Ok(SheetFormat::Toml) => "application/toml",
        Err(_) => "application/octet-stream",
    };

    // Directories are recorded by layout only
    let content = if path.is_file() {
        match std::fs::read(path) {
            Ok(content) => content,
            Err(e) => {
                output::print_warning(&format!("Could not store uploaded file: {}", e));
                return None;
            }
        }
    } else {
        Vec::new()
    };

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let sheets: Vec<SheetInfo> = data.sheets().map(SheetInfo::from_table).collect();

    match store.store_upload(&content, &filename, file_type, &sheets) {
        Ok(record) => {
            info!("Stored file {} with id {}", filename, record.id);
            Some(record.id)
        }
        Err(e) => {
            output::print_warning(&format!("Could not store uploaded file: {}", e));
            None
        }
    }
}

fn spreadsheet_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsm") => "application/vnd.ms-excel.sheet.macroEnabled.12",
        Some("xlsb") => "application/vnd.ms-excel.sheet.binary.macroEnabled.12",
        Some("ods") => "application/vnd.oasis.opendocument.spreadsheet",
        _ => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    }
}

fn connect_assistant(config: &AppConfig) -> Option<Assistant> {
    let assistant = config
        .assistant
        .clone()
        .with_env_overrides()
        .and_then(Assistant::new);

    match assistant {
        Ok(assistant) => {
            info!(
                "Using model {} at {}",
                assistant.config().model,
                assistant.config().endpoint
            );
            Some(assistant)
        }
        Err(e) => {
            output::print_warning(&format!("AI features disabled: {}", e));
            None
        }
    }
}

/// Records a completion and returns its text, or warns and returns nothing.
fn accept_completion(
    result: srs_assistant::Result<Completion>,
    store: Option<&dyn ResultStore>,
    file_id: Option<&str>,
    sheet: &str,
) -> Option<String> {
    match result {
        Ok(completion) => {
            if let Some(store) = store {
                if let Err(e) = store.store_ai_response(file_id, sheet, &completion) {
                    output::print_warning(&format!("Could not store AI response: {}", e));
                }
            }
            Some(completion.text)
        }
        Err(e) => {
            output::print_warning(&format!("Error getting AI response: {}", e));
            None
        }
    }
}
