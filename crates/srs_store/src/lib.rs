//! # SRS Store
//!
//! History of what the validator has seen and said: uploaded files, the
//! validation result of every sheet, and every model response.
//!
//! Storage is append-only. Records are never updated, and history queries
//! return the newest records first.
//!
//! Two backends implement [`ResultStore`]:
//!
//! - [`JsonlStore`]: one JSON-lines file per record kind plus raw upload
//!   blobs, all under one directory
//! - [`MemoryStore`]: in-process, for tests and runs that keep nothing
//!
//! ## Example
//!
//! ```rust
//! use srs_core::ValidationReport;
//! use srs_store::{MemoryStore, ResultStore};
//!
//! let store = MemoryStore::new();
//! let upload = store.store_upload(b"a,b\n1,2\n", "data.csv", "text/csv", &[]).unwrap();
//! store
//!     .store_validation(Some(&upload.id), "Sheet1", &ValidationReport::new(1, 2, vec![]))
//!     .unwrap();
//!
//! let history = store.validation_history(Some(&upload.id), 10).unwrap();
//! assert_eq!(history[0].sheet_name, "Sheet1");
//! ```

mod error;
mod jsonl;
mod memory;
mod record;

pub use error::{Result, StoreError};
pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use record::*;

use srs_assistant::Completion;
use srs_core::ValidationReport;

/// Persistence for uploads, validation results and model responses.
pub trait ResultStore {
    /// Stores an uploaded file and its sheet layout.
    fn store_upload(
        &self,
        content: &[u8],
        filename: &str,
        file_type: &str,
        sheets: &[SheetInfo],
    ) -> Result<UploadRecord>;

    /// Stores the validation result of one sheet.
    ///
    /// `file_id` is `None` when the upload could not be recorded.
    fn store_validation(
        &self,
        file_id: Option<&str>,
        sheet: &str,
        report: &ValidationReport,
    ) -> Result<ValidationRecord>;

    /// Stores a model response about one sheet.
    fn store_ai_response(
        &self,
        file_id: Option<&str>,
        sheet: &str,
        completion: &Completion,
    ) -> Result<AiResponseRecord>;

    /// Most recent uploads, newest first.
    fn file_history(&self, limit: usize) -> Result<Vec<UploadRecord>>;

    /// Most recent validation results, newest first, optionally for one file.
    fn validation_history(
        &self,
        file_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ValidationRecord>>;

    /// Most recent model responses, newest first, optionally for one file.
    fn ai_response_history(
        &self,
        file_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AiResponseRecord>>;

    /// Raw content of an uploaded file.
    fn file_content(&self, id: &str) -> Result<Vec<u8>>;
}

/// Keeps the last `limit` records in reverse order, optionally filtered by
/// file id. Input is in insertion order.
pub(crate) fn newest_first<T, F>(records: Vec<T>, file_id: Option<&str>, limit: usize, key: F) -> Vec<T>
where
    F: Fn(&T) -> Option<&str>,
{
    records
        .into_iter()
        .rev()
        .filter(|record| file_id.is_none_or(|id| key(record) == Some(id)))
        .take(limit)
        .collect()
}
