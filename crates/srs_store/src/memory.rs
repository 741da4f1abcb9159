use crate::{
    AiResponseRecord, Result, ResultStore, SheetInfo, StoreError, UploadRecord, ValidationRecord,
    newest_first,
};
use srs_assistant::Completion;
use srs_core::ValidationReport;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    uploads: Vec<UploadRecord>,
    contents: HashMap<String, Vec<u8>>,
    validations: Vec<ValidationRecord>,
    ai_responses: Vec<AiResponseRecord>,
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Records are only ever pushed, so a poisoned lock still holds valid data.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResultStore for MemoryStore {
    fn store_upload(
        &self,
        content: &[u8],
        filename: &str,
        file_type: &str,
        sheets: &[SheetInfo],
    ) -> Result<UploadRecord> {
        let record = UploadRecord::new(content, filename, file_type, sheets);
        let mut inner = self.lock();
        inner.contents.insert(record.id.clone(), content.to_vec());
        inner.uploads.push(record.clone());
        Ok(record)
    }

    fn store_validation(
        &self,
        file_id: Option<&str>,
        sheet: &str,
        report: &ValidationReport,
    ) -> Result<ValidationRecord> {
        let record = ValidationRecord::new(file_id, sheet, report);
        self.lock().validations.push(record.clone());
        Ok(record)
    }

    fn store_ai_response(
        &self,
        file_id: Option<&str>,
        sheet: &str,
        completion: &Completion,
    ) -> Result<AiResponseRecord> {
        let record = AiResponseRecord::new(file_id, sheet, completion);
        self.lock().ai_responses.push(record.clone());
        Ok(record)
    }

    fn file_history(&self, limit: usize) -> Result<Vec<UploadRecord>> {
        let records = self.lock().uploads.clone();
        Ok(newest_first(records, None, limit, |r: &UploadRecord| Some(r.id.as_str())))
    }

    fn validation_history(
        &self,
        file_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ValidationRecord>> {
        let records = self.lock().validations.clone();
        Ok(newest_first(records, file_id, limit, |r: &ValidationRecord| r.file_id.as_deref()))
    }

    fn ai_response_history(
        &self,
        file_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AiResponseRecord>> {
        let records = self.lock().ai_responses.clone();
        Ok(newest_first(records, file_id, limit, |r: &AiResponseRecord| r.file_id.as_deref()))
    }

    fn file_content(&self, id: &str) -> Result<Vec<u8>> {
        self.lock()
            .contents
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
