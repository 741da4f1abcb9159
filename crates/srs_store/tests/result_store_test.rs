//! Behaviour shared by every `ResultStore` backend.

use pretty_assertions::assert_eq;
use srs_assistant::{Completion, ResponseKind};
use srs_core::{TableBuilder, ValidationFinding, ValidationReport};
use srs_store::{
    JsonlStore, MemoryStore, ResultStore, SheetInfo, StoreError, ValidationStatus,
};
use tempfile::TempDir;

fn completion(text: &str) -> Completion {
    Completion {
        kind: ResponseKind::ValidationExplanation,
        prompt: "Explain".into(),
        text: text.into(),
        model: "mistral".into(),
    }
}

fn sheet_info() -> Vec<SheetInfo> {
    let table = TableBuilder::new("Sheet1")
        .values("Employee_ID", ["EMP001"])
        .values("Salary", [45000_i64])
        .build()
        .unwrap();
    vec![SheetInfo::from_table(&table)]
}

fn check_upload_roundtrip(store: &dyn ResultStore) {
    let content = b"Employee_ID,Salary\nEMP001,45000\n";
    let upload = store
        .store_upload(content, "employees.csv", "text/csv", &sheet_info())
        .unwrap();

    assert_eq!(upload.file_size, content.len());
    assert_eq!(upload.sheets, vec!["Sheet1"]);
    assert_eq!(upload.sheet_info[0].column_names, vec!["Employee_ID", "Salary"]);
    assert_eq!(store.file_content(&upload.id).unwrap(), content.to_vec());

    let history = store.file_history(10).unwrap();
    assert_eq!(history, vec![upload]);
}

fn check_histories_newest_first(store: &dyn ResultStore) {
    let failing = ValidationReport::new(5, 3, vec![ValidationFinding::missing_column("Bonus")]);
    let passing = ValidationReport::new(5, 3, vec![]);

    store.store_validation(Some("file-a"), "Employees", &failing).unwrap();
    store.store_validation(Some("file-b"), "Payroll", &passing).unwrap();
    store.store_validation(Some("file-a"), "Payroll", &passing).unwrap();

    let all = store.validation_history(None, 10).unwrap();
    let order: Vec<_> = all
        .iter()
        .map(|r| (r.file_id.as_deref(), r.sheet_name.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            (Some("file-a"), "Payroll"),
            (Some("file-b"), "Payroll"),
            (Some("file-a"), "Employees")
        ]
    );

    let file_a = store.validation_history(Some("file-a"), 10).unwrap();
    assert_eq!(file_a.len(), 2);
    assert_eq!(file_a[1].status, ValidationStatus::Failed);
    assert_eq!(file_a[1].failed_rules, failing.findings);
    assert_eq!(file_a[1].validation_summary, failing.summary);

    assert_eq!(store.validation_history(None, 1).unwrap().len(), 1);
    assert!(store.validation_history(Some("missing"), 10).unwrap().is_empty());
}

fn check_ai_responses(store: &dyn ResultStore) {
    store.store_ai_response(Some("file-a"), "Employees", &completion("first")).unwrap();
    store.store_ai_response(Some("file-b"), "Payroll", &completion("second")).unwrap();

    let history = store.ai_response_history(Some("file-a"), 10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].ai_response, "first");
    assert_eq!(history[0].response_length, 5);
    assert_eq!(history[0].response_type, ResponseKind::ValidationExplanation);

    let latest = store.ai_response_history(None, 1).unwrap();
    assert_eq!(latest[0].ai_response, "second");
}

fn check_results_without_upload(store: &dyn ResultStore) {
    let report = ValidationReport::new(2, 1, vec![ValidationFinding::missing_required("Dept")]);
    store.store_validation(None, "Sheet1", &report).unwrap();
    store.store_ai_response(None, "Sheet1", &completion("why")).unwrap();

    let validations = store.validation_history(None, 10).unwrap();
    assert_eq!(validations.len(), 1);
    assert_eq!(validations[0].file_id, None);
    assert_eq!(validations[0].status, ValidationStatus::Failed);
    assert!(store.validation_history(Some("file-a"), 10).unwrap().is_empty());

    let responses = store.ai_response_history(None, 10).unwrap();
    assert_eq!(responses[0].file_id, None);
    assert_eq!(responses[0].ai_response, "why");
}

fn check_unknown_file(store: &dyn ResultStore) {
    let err = store
        .file_content("00000000-0000-4000-8000-000000000000")
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn test_memory_store() {
    check_upload_roundtrip(&MemoryStore::new());
    check_histories_newest_first(&MemoryStore::new());
    check_ai_responses(&MemoryStore::new());
    check_results_without_upload(&MemoryStore::new());
    check_unknown_file(&MemoryStore::new());
}

#[test]
fn test_jsonl_store() {
    for check in [
        check_upload_roundtrip,
        check_histories_newest_first,
        check_ai_responses,
        check_results_without_upload,
        check_unknown_file,
    ] {
        let dir = TempDir::new().unwrap();
        check(&JsonlStore::open(dir.path()).unwrap());
    }
}

#[test]
fn test_jsonl_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let upload = {
        let store = JsonlStore::open(dir.path()).unwrap();
        store
            .store_upload(b"a\n1\n", "a.csv", "text/csv", &[])
            .unwrap()
    };

    let reopened = JsonlStore::open(dir.path()).unwrap();
    assert_eq!(reopened.file_history(10).unwrap(), vec![upload.clone()]);
    assert_eq!(reopened.file_content(&upload.id).unwrap(), b"a\n1\n".to_vec());
}
