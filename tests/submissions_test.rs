//! Integration tests for submission ingestion and validation

use async_trait::async_trait;
use nad_ch::adapters::memory::InMemoryStorage;
use nad_ch::adapters::storage::{DownloadResult, Storage};
use nad_ch::core::tasks::{TaskHandle, ValidationRequest, ValidationTask};
use nad_ch::core::use_cases::{
    add_column_map, add_data_provider, add_user, ingest_data_submission,
    list_data_submissions_by_provider, validate_data_submission,
};
use nad_ch::core::ApplicationContext;
use nad_ch::domain::{storage_key, DataSubmissionReport, Mapping, NadError, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// In-memory storage that remembers which temp dirs were cleaned up
#[derive(Default)]
struct RecordingStorage {
    inner: InMemoryStorage,
    cleaned: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn upload(&self, source: &str, destination: &str) -> Result<bool> {
        self.inner.upload(source, destination).await
    }

    async fn get_file_url(&self, key: &str) -> Result<String> {
        self.inner.get_file_url(key).await
    }

    async fn download_temp(&self, key: &str) -> Result<Option<DownloadResult>> {
        self.inner.download_temp(key).await
    }

    async fn cleanup_temp_dir(&self, temp_dir: &Path) -> Result<()> {
        self.cleaned.lock().unwrap().push(temp_dir.to_path_buf());
        self.inner.cleanup_temp_dir(temp_dir).await
    }
}

/// Validation task that never produces a report
#[derive(Default)]
struct NoResultTask {
    called: AtomicBool,
}

impl ValidationTask for NoResultTask {
    fn delay(&self, _request: ValidationRequest) -> TaskHandle<DataSubmissionReport> {
        self.called.store(true, Ordering::SeqCst);
        TaskHandle::ready("load_and_validate", None)
    }
}

const CSV: &str = "address_number,street,state\n\
                   1,Main St,NJ\n\
                   ,Elm St,NJ\n\
                   3,Oak Ave,\n";

struct Fixture {
    ctx: ApplicationContext,
    storage: Arc<RecordingStorage>,
    file_name: String,
    _dir: TempDir,
}

/// Provider "State X" with one user, one column map and a CSV file on disk
async fn fixture() -> Fixture {
    let storage = Arc::new(RecordingStorage::default());
    let ctx = ApplicationContext::in_memory().with_storage(storage.clone());

    add_data_provider(&ctx, "State X").await.unwrap();
    let user = add_user(&ctx, "gis@x.example", "Grace", "Hopper", "State X")
        .await
        .unwrap();

    let mut mapping = Mapping::new();
    mapping.insert("Add_Number".to_string(), "address_number".to_string());
    mapping.insert("St_Name".to_string(), "street".to_string());
    mapping.insert("State".to_string(), "state".to_string());
    mapping.insert("County".to_string(), "county".to_string());
    add_column_map(&ctx, user.id, "Default", mapping)
        .await
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("addresses.csv");
    std::fs::write(&path, CSV).unwrap();

    Fixture {
        ctx,
        storage,
        file_name: path.to_string_lossy().to_string(),
        _dir: dir,
    }
}

#[tokio::test]
async fn test_ingest_data_submission() {
    let f = fixture().await;

    let submission = ingest_data_submission(&f.ctx, &f.file_name, "State X")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(submission.file_name, f.file_name);
    assert_eq!(submission.producer_name, "State X");
    assert_eq!(submission.url, format!("memory://{}", f.file_name));
    assert!(
        f.storage
            .inner
            .contains(&storage_key("State X", &f.file_name))
            .await
    );
}

#[tokio::test]
async fn test_ingest_empty_file_name() {
    let f = fixture().await;

    let result = ingest_data_submission(&f.ctx, "", "State X").await.unwrap();
    assert!(result.is_none());
    assert!(f.storage.inner.keys().await.is_empty());
    assert!(f.ctx.submissions().get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ingest_unknown_provider() {
    let f = fixture().await;

    let result = ingest_data_submission(&f.ctx, &f.file_name, "State Y")
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(f.storage.inner.keys().await.is_empty());
    assert!(f.ctx.submissions().get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ingest_unreadable_file() {
    let f = fixture().await;

    let result = ingest_data_submission(&f.ctx, "/no/such/addresses.csv", "State X")
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(f.ctx.submissions().get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_data_submissions_by_provider() {
    let f = fixture().await;
    add_data_provider(&f.ctx, "State Y").await.unwrap();

    ingest_data_submission(&f.ctx, &f.file_name, "State X")
        .await
        .unwrap();
    ingest_data_submission(&f.ctx, &f.file_name, "State Y")
        .await
        .unwrap();
    ingest_data_submission(&f.ctx, &f.file_name, "State X")
        .await
        .unwrap();

    let submissions = list_data_submissions_by_provider(&f.ctx, "State X")
        .await
        .unwrap()
        .unwrap();
    let ids: Vec<i64> = submissions.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(submissions.iter().all(|s| s.producer_name == "State X"));
}

#[tokio::test]
async fn test_list_data_submissions_unknown_provider() {
    let f = fixture().await;
    let result = list_data_submissions_by_provider(&f.ctx, "State Y")
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_validate_data_submission() {
    let f = fixture().await;
    ingest_data_submission(&f.ctx, &f.file_name, "State X")
        .await
        .unwrap();

    let report = validate_data_submission(&f.ctx, &f.file_name, "Default")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.overview.records_count, 3);
    assert_eq!(report.overview.feature_count, 3);
    assert_eq!(report.overview.records_flagged, 2);
    assert_eq!(report.overview.missing_required_fields, vec!["County"]);
    assert_eq!(report.feature("Add_Number").unwrap().null_count, 1);
    assert_eq!(report.feature("St_Name").unwrap().null_count, 0);

    let stored = f
        .ctx
        .submissions()
        .get_by_file_name(&f.file_name)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.report, Some(report));

    let cleaned = f.storage.cleaned.lock().unwrap().clone();
    assert_eq!(cleaned.len(), 1);
    assert!(!cleaned[0].exists());
}

#[tokio::test]
async fn test_validate_unknown_submission() {
    let f = fixture().await;
    let result = validate_data_submission(&f.ctx, "missing.csv", "Default")
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_validate_unknown_column_map() {
    let f = fixture().await;
    ingest_data_submission(&f.ctx, &f.file_name, "State X")
        .await
        .unwrap();

    let result = validate_data_submission(&f.ctx, &f.file_name, "Other")
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(f.storage.cleaned.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_validate_task_without_result() {
    let f = fixture().await;
    let task = Arc::new(NoResultTask::default());
    let ctx = f.ctx.clone().with_validation_task(task.clone());
    ingest_data_submission(&ctx, &f.file_name, "State X")
        .await
        .unwrap();

    let err = validate_data_submission(&ctx, &f.file_name, "Default")
        .await
        .unwrap_err();

    assert!(matches!(err, NadError::Task(_)));
    assert!(task.called.load(Ordering::SeqCst));

    let stored = ctx
        .submissions()
        .get_by_file_name(&f.file_name)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.report.is_none());

    let cleaned = f.storage.cleaned.lock().unwrap().clone();
    assert_eq!(cleaned.len(), 1);
    assert!(!cleaned[0].exists());
}
