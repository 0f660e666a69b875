//! End-to-end complaint lifecycle against in-memory and CSV stores.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use zeladoria_store::{CsvFileStore, InMemoryStore, PhotoStore, RecordStore, DEFAULT_PHOTO_DIR};
use zeladoria_types::{Category, NewComplaint, ProtocolId, RecordError, Status};
use zeladoria_workflow::{ComplaintWorkflow, DuplicatePolicy, WorkflowConfig, WorkflowError};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Harness {
    store: Arc<InMemoryStore>,
    workflow: ComplaintWorkflow,
    _dir: tempfile::TempDir,
}

fn harness(config: WorkflowConfig) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(InMemoryStore::new());
    let workflow = ComplaintWorkflow::new(
        store.clone(),
        PhotoStore::new(dir.path(), DEFAULT_PHOTO_DIR),
        config,
    );
    Harness {
        store,
        workflow,
        _dir: dir,
    }
}

fn pothole(id: &str) -> NewComplaint {
    NewComplaint::new(id, "Main St, 10", Category::Pothole)
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()
}

// ---------------------------------------------------------------------------
// Intake
// ---------------------------------------------------------------------------

#[tokio::test]
async fn intake_creates_unanswered_record_dated_today() {
    let h = harness(WorkflowConfig::default());
    let before = Local::now().date_naive();

    let record = h.workflow.intake(pothole("001/2026"), None).await.unwrap();

    let after = Local::now().date_naive();
    assert_eq!(record.protocol_id, ProtocolId::new("001/2026"));
    assert_eq!(record.status, Status::Unanswered);
    assert_eq!(record.ombudsman_ref, "Not informed");
    assert_eq!(record.category, Category::Pothole);
    assert!(record.created_date == before || record.created_date == after);

    let stored = h.workflow.list().await;
    assert_eq!(stored, vec![record]);
}

#[tokio::test]
async fn intake_appends_in_order() {
    let h = harness(WorkflowConfig::default());
    for id in ["3", "1", "2"] {
        h.workflow.intake_on(pothole(id), None, date()).await.unwrap();
    }
    let ids: Vec<_> = h
        .workflow
        .list()
        .await
        .into_iter()
        .map(|r| r.protocol_id.0)
        .collect();
    assert_eq!(ids, ["3", "1", "2"]);
    assert_eq!(h.store.write_count(), 3);
}

#[tokio::test]
async fn intake_with_blank_fields_writes_nothing() {
    let h = harness(WorkflowConfig::default());

    let err = h
        .workflow
        .intake(NewComplaint::new("  ", "Main St", Category::Other), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Validation(RecordError::MissingRequiredField("protocol_id"))
    ));
    assert!(err.is_user_error());

    let err = h
        .workflow
        .intake(NewComplaint::new("9", "", Category::Other), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Validation(RecordError::MissingRequiredField("address"))
    ));
    assert_eq!(h.store.write_count(), 0);
}

#[tokio::test]
async fn intake_stores_photo_and_references_it() {
    let h = harness(WorkflowConfig::default());
    let record = h
        .workflow
        .intake_on(pothole("001/2026"), Some(JPEG), date())
        .await
        .unwrap();

    assert_eq!(record.photo_ref, "photos/001_2026.jpg");
    let path = h.workflow.photos().resolve(&record.photo_ref).unwrap();
    assert_eq!(std::fs::read(path).unwrap(), JPEG);
}

#[tokio::test]
async fn intake_rejects_unknown_photo_format() {
    let h = harness(WorkflowConfig::default());
    let err = h
        .workflow
        .intake_on(pothole("1"), Some(&b"BM not an accepted image"[..]), date())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Photo(_)));
    assert!(err.is_user_error());
    assert!(h.workflow.list().await.is_empty());
}

#[tokio::test]
async fn failed_intake_write_removes_photo() {
    let h = harness(WorkflowConfig::default());
    h.store.set_fail_writes(true);

    let err = h
        .workflow
        .intake_on(pothole("7"), Some(JPEG), date())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Write(_)));
    assert!(h.workflow.photos().resolve("photos/7.jpg").is_none());
}

#[tokio::test]
async fn duplicates_follow_configured_policy() {
    let h = harness(WorkflowConfig::default());
    h.workflow.intake_on(pothole("1"), None, date()).await.unwrap();
    let mut second = pothole("1");
    second.address = "Other address".into();
    h.workflow.intake_on(second, None, date()).await.unwrap();

    assert_eq!(h.workflow.list().await.len(), 2);
    let found = h.workflow.find(&"1".into()).await.unwrap();
    assert_eq!(found.address, "Main St, 10");

    let strict = harness(WorkflowConfig {
        duplicate_policy: DuplicatePolicy::Reject,
        ..WorkflowConfig::default()
    });
    strict.workflow.intake_on(pothole("1"), None, date()).await.unwrap();
    let err = strict
        .workflow
        .intake_on(pothole(" 1 "), None, date())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::DuplicateProtocol(id) if id.as_str() == "1"));
    assert_eq!(strict.workflow.list().await.len(), 1);
}

// ---------------------------------------------------------------------------
// Status changes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn completing_updates_dashboard_counts() {
    let h = harness(WorkflowConfig::default());
    h.workflow.intake_on(pothole("1"), None, date()).await.unwrap();
    h.workflow.intake_on(pothole("2"), None, date()).await.unwrap();

    let before = h.workflow.summary().await;
    h.workflow
        .set_status(&"1".into(), Status::Completed)
        .await
        .unwrap();
    let after = h.workflow.summary().await;

    assert_eq!(after.completed, before.completed + 1);
    assert_eq!(after.pending, before.pending - 1);
    assert_eq!(after.total, before.total);
}

#[tokio::test]
async fn repeated_status_is_idempotent() {
    let h = harness(WorkflowConfig::default());
    h.workflow.intake_on(pothole("1"), None, date()).await.unwrap();
    let writes = h.store.write_count();

    let first = h
        .workflow
        .set_status(&"1".into(), Status::UnderReview)
        .await
        .unwrap();
    let sheet = h.store.snapshot().await;
    let second = h
        .workflow
        .set_status(&"1".into(), Status::UnderReview)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(h.store.write_count(), writes + 1);
    assert_eq!(h.store.snapshot().await, sheet);
}

#[tokio::test]
async fn status_change_applies_to_first_match_only() {
    let h = harness(WorkflowConfig::default());
    h.workflow.intake_on(pothole("1"), None, date()).await.unwrap();
    h.workflow.intake_on(pothole("1"), None, date()).await.unwrap();

    h.workflow
        .set_status(&"1".into(), Status::InProgress)
        .await
        .unwrap();
    let statuses: Vec<_> = h.workflow.list().await.iter().map(|r| r.status).collect();
    assert_eq!(statuses, [Status::InProgress, Status::Unanswered]);
}

#[tokio::test]
async fn status_change_never_touches_creation_date() {
    let h = harness(WorkflowConfig::default());
    h.workflow.intake_on(pothole("1"), None, date()).await.unwrap();
    let updated = h
        .workflow
        .set_status(&"1".into(), Status::InProgress)
        .await
        .unwrap();
    assert_eq!(updated.created_date, date());
}

#[tokio::test]
async fn completed_is_terminal_unless_reopen_allowed() {
    let h = harness(WorkflowConfig::default());
    h.workflow.intake_on(pothole("1"), None, date()).await.unwrap();
    h.workflow
        .set_status(&"1".into(), Status::Completed)
        .await
        .unwrap();

    let err = h
        .workflow
        .set_status(&"1".into(), Status::Unanswered)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidTransition { .. }));

    let reopening = harness(WorkflowConfig {
        allow_reopen: true,
        ..WorkflowConfig::default()
    });
    reopening.workflow.intake_on(pothole("1"), None, date()).await.unwrap();
    reopening
        .workflow
        .set_status(&"1".into(), Status::Completed)
        .await
        .unwrap();
    let record = reopening
        .workflow
        .set_status(&"1".into(), Status::InProgress)
        .await
        .unwrap();
    assert_eq!(record.status, Status::InProgress);
}

#[tokio::test]
async fn unknown_protocol_is_not_found() {
    let h = harness(WorkflowConfig::default());
    let err = h
        .workflow
        .set_status(&"404".into(), Status::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::RecordNotFound(_)));
}

#[tokio::test]
async fn failed_write_leaves_stored_status() {
    let h = harness(WorkflowConfig::default());
    h.workflow.intake_on(pothole("1"), None, date()).await.unwrap();
    h.store.set_fail_writes(true);

    let err = h
        .workflow
        .set_status(&"1".into(), Status::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Write(_)));
    assert!(!err.is_user_error());

    h.store.set_fail_writes(false);
    let record = h.workflow.find(&"1".into()).await.unwrap();
    assert_eq!(record.status, Status::Unanswered);
}

// ---------------------------------------------------------------------------
// Degraded reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreadable_store_renders_empty() {
    let h = harness(WorkflowConfig::default());
    h.workflow.intake_on(pothole("1"), None, date()).await.unwrap();
    h.store.set_fail_reads(true);

    assert!(h.workflow.list().await.is_empty());
    assert!(h.workflow.find(&"1".into()).await.is_none());
    assert_eq!(h.workflow.summary().await.total, 0);
}

#[tokio::test]
async fn guarded_intake_does_not_overwrite_unreadable_sheet() {
    let h = harness(WorkflowConfig::default());
    h.workflow.intake_on(pothole("1"), None, date()).await.unwrap();
    h.store.set_fail_reads(true);

    let err = h
        .workflow
        .intake_on(pothole("2"), None, date())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Read(_)));

    h.store.set_fail_reads(false);
    assert_eq!(h.workflow.list().await.len(), 1);
}

#[tokio::test]
async fn unguarded_intake_overwrites_with_degraded_collection() {
    let h = harness(WorkflowConfig {
        guard_degraded_writes: false,
        ..WorkflowConfig::default()
    });
    h.workflow.intake_on(pothole("1"), None, date()).await.unwrap();
    h.store.set_fail_reads(true);

    h.workflow.intake_on(pothole("2"), None, date()).await.unwrap();

    h.store.set_fail_reads(false);
    let ids: Vec<_> = h
        .workflow
        .list()
        .await
        .into_iter()
        .map(|r| r.protocol_id.0)
        .collect();
    assert_eq!(ids, ["2"]);
}

// ---------------------------------------------------------------------------
// File-backed round trip
// ---------------------------------------------------------------------------

#[tokio::test]
async fn csv_sheet_survives_full_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = dir.path().join("complaints.csv");
    let store: Arc<dyn RecordStore> = Arc::new(CsvFileStore::new(&sheet));
    let workflow = ComplaintWorkflow::new(
        store.clone(),
        PhotoStore::new(dir.path(), DEFAULT_PHOTO_DIR),
        WorkflowConfig::default(),
    );

    workflow
        .intake_on(
            pothole("001/2026").with_description("Near the school, \"urgent\""),
            None,
            date(),
        )
        .await
        .unwrap();
    workflow
        .intake_on(
            NewComplaint::new("002/2026", "Rua A", Category::Lighting).with_ombudsman_ref("OUV-3"),
            Some(JPEG),
            date(),
        )
        .await
        .unwrap();
    workflow
        .set_status(&"002/2026".into(), Status::InProgress)
        .await
        .unwrap();

    let bytes = std::fs::read(&sheet).unwrap();
    store.save_all(&store.load_all().await).await.unwrap();
    assert_eq!(std::fs::read(&sheet).unwrap(), bytes);

    let found = workflow.find(&"002/2026".into()).await.unwrap();
    assert_eq!(found.status, Status::InProgress);
    assert_eq!(found.ombudsman_ref, "OUV-3");
    assert_eq!(found.photo_ref, "photos/002_2026.jpg");
}
