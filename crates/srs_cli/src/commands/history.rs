use anyhow::{Context, Result};
use clap::ValueEnum;
use srs_store::{JsonlStore, ResultStore};
use std::io::Write;
use tracing::info;

use crate::config::AppConfig;
use crate::output;

/// Record kinds that can be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryKind {
    /// Uploaded data files
    Files,
    /// Per-sheet validation results
    Validations,
    /// Model explanations and summaries
    Ai,
}

pub fn execute(
    kind: HistoryKind,
    file_id: Option<&str>,
    limit: usize,
    store_dir: Option<&str>,
    format: &str,
    dump: bool,
    config_path: Option<&str>,
) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let dir = config.store_dir(store_dir);
    info!("Reading {:?} history from {}", kind, dir.display());

    let store = JsonlStore::open(dir.clone())
        .with_context(|| format!("Failed to open history at {}", dir.display()))?;
    if dump {
        let id = file_id.context("--dump needs --file-id")?;
        let content = store
            .file_content(id)
            .with_context(|| format!("No stored upload with id {}", id))?;
        std::io::stdout().write_all(&content)?;
        return Ok(());
    }

    let json = format == "json";

    match kind {
        HistoryKind::Files => {
            let mut records = store.file_history(usize::MAX)?;
            if let Some(id) = file_id {
                records.retain(|record| record.id == id);
            }
            records.truncate(limit);
            if json {
                output::print_json(&records);
            } else {
                output::print_uploads(&records);
            }
        }
        HistoryKind::Validations => {
            let records = store.validation_history(file_id, limit)?;
            if json {
                output::print_json(&records);
            } else {
                output::print_validations(&records);
            }
        }
        HistoryKind::Ai => {
            let records = store.ai_response_history(file_id, limit)?;
            if json {
                output::print_json(&records);
            } else {
                output::print_ai_responses(&records);
            }
        }
    }

    Ok(())
}
