//! JSON-lines store on the local filesystem.
//!
//! Layout under the store root:
//!
//! ```text
//! uploads.jsonl        one UploadRecord per line
//! validations.jsonl    one ValidationRecord per line
//! ai_responses.jsonl   one AiResponseRecord per line
//! files/<id>           raw content of each upload
//! ```

use crate::{
    AiResponseRecord, Result, ResultStore, SheetInfo, StoreError, UploadRecord, ValidationRecord,
    newest_first,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use srs_assistant::Completion;
use srs_core::ValidationReport;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const UPLOADS_FILE: &str = "uploads.jsonl";
const VALIDATIONS_FILE: &str = "validations.jsonl";
const AI_RESPONSES_FILE: &str = "ai_responses.jsonl";
const FILES_DIR: &str = "files";

/// Append-only store backed by JSON-lines files.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    root: PathBuf,
}

impl JsonlStore {
    /// Opens a store, creating its directory layout if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(FILES_DIR))?;
        debug!("Opened store at {}", root.display());
        Ok(Self { root })
    }

    /// Returns the store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn append<T: Serialize>(&self, file: &str, record: &T) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.root.join(file))?;
        handle.write_all(line.as_bytes())?;
        Ok(())
    }

    fn read_all<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}

impl ResultStore for JsonlStore {
    fn store_upload(
        &self,
        content: &[u8],
        filename: &str,
        file_type: &str,
        sheets: &[SheetInfo],
    ) -> Result<UploadRecord> {
        let record = UploadRecord::new(content, filename, file_type, sheets);
        fs::write(self.root.join(FILES_DIR).join(&record.id), content)?;
        self.append(UPLOADS_FILE, &record)?;
        debug!("Stored file {} with id {}", filename, record.id);
        Ok(record)
    }

    fn store_validation(
        &self,
        file_id: Option<&str>,
        sheet: &str,
        report: &ValidationReport,
    ) -> Result<ValidationRecord> {
        let record = ValidationRecord::new(file_id, sheet, report);
        self.append(VALIDATIONS_FILE, &record)?;
        debug!("Stored validation result for sheet {}", sheet);
        Ok(record)
    }

    fn store_ai_response(
        &self,
        file_id: Option<&str>,
        sheet: &str,
        completion: &Completion,
    ) -> Result<AiResponseRecord> {
        let record = AiResponseRecord::new(file_id, sheet, completion);
        self.append(AI_RESPONSES_FILE, &record)?;
        debug!("Stored {} for sheet {}", completion.kind, sheet);
        Ok(record)
    }

    fn file_history(&self, limit: usize) -> Result<Vec<UploadRecord>> {
        let records = self.read_all(UPLOADS_FILE)?;
        Ok(newest_first(records, None, limit, |r: &UploadRecord| Some(r.id.as_str())))
    }

    fn validation_history(
        &self,
        file_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ValidationRecord>> {
        let records = self.read_all(VALIDATIONS_FILE)?;
        Ok(newest_first(records, file_id, limit, |r: &ValidationRecord| r.file_id.as_deref()))
    }

    fn ai_response_history(
        &self,
        file_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AiResponseRecord>> {
        let records = self.read_all(AI_RESPONSES_FILE)?;
        Ok(newest_first(records, file_id, limit, |r: &AiResponseRecord| r.file_id.as_deref()))
    }

    fn file_content(&self, id: &str) -> Result<Vec<u8>> {
        // Ids double as file names, so only accept well-formed ones.
        let uuid = Uuid::parse_str(id).map_err(|_| StoreError::NotFound(id.to_string()))?;
        let path = self.root.join(FILES_DIR).join(uuid.to_string());
        if !path.is_file() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(fs::read(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_layout() {
        let dir = TempDir::new().unwrap();
        let store = JsonlStore::open(dir.path().join("history")).unwrap();
        assert!(store.root().join(FILES_DIR).is_dir());
        assert!(store.file_history(10).unwrap().is_empty());
    }

    #[test]
    fn test_records_are_one_per_line() {
        let dir = TempDir::new().unwrap();
        let store = JsonlStore::open(dir.path()).unwrap();
        let report = ValidationReport::new(0, 0, vec![]);
        store.store_validation(Some("f1"), "A", &report).unwrap();
        store.store_validation(None, "B", &report).unwrap();

        let content = fs::read_to_string(dir.path().join(VALIDATIONS_FILE)).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.lines().all(|line| line.contains(r#""status":"passed""#)));
    }

    #[test]
    fn test_corrupt_line_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonlStore::open(dir.path()).unwrap();
        fs::write(dir.path().join(UPLOADS_FILE), "{not json}\n").unwrap();

        assert!(matches!(
            store.file_history(1).unwrap_err(),
            StoreError::Serialization(_)
        ));
    }

    #[test]
    fn test_file_content_rejects_paths() {
        let dir = TempDir::new().unwrap();
        let store = JsonlStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.file_content("../uploads.jsonl").unwrap_err(),
            StoreError::NotFound(_)
        ));
    }
}
