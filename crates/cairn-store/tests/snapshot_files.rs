//! Snapshot file round trips and failure modes.

use assert_matches::assert_matches;
use cairn_core::{BlockHeight, ContentId, ContentMetadata, ContentRecord, ErrorKind, PrincipalId};
use cairn_store::snapshot::{load, save};
use cairn_store::{GrantEntry, RegistrySnapshot, SequenceCounter, SnapshotError};

fn sample_snapshot() -> RegistrySnapshot {
    RegistrySnapshot {
        counter: SequenceCounter::resume(3),
        records: vec![
            ContentRecord::new(
                ContentId::new(1),
                PrincipalId::new("alice"),
                BlockHeight::new(10),
                ContentMetadata::new("Doc A", 100, "first", ["x"]),
            ),
            ContentRecord::new(
                ContentId::new(3),
                PrincipalId::new("bob"),
                BlockHeight::new(12),
                ContentMetadata::new("Doc C", 300, "third", ["y", "z"]),
            ),
        ],
        grants: vec![
            GrantEntry {
                content_id: ContentId::new(1),
                principal: PrincipalId::new("alice"),
                granted: true,
            },
            // Record 2 was deleted; its grant row survives
            GrantEntry {
                content_id: ContentId::new(2),
                principal: PrincipalId::new("carol"),
                granted: true,
            },
        ],
    }
}

#[test]
fn test_save_then_load_preserves_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let snapshot = sample_snapshot();
    save(&path, &snapshot).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(loaded, snapshot);
}

#[test]
fn test_load_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = load(&path).unwrap_err();
    assert_matches!(err, SnapshotError::Io { .. });
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_load_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert_matches!(load(&path), Err(SnapshotError::Malformed(_)));
}

#[test]
fn test_load_rejects_inconsistent_counter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut snapshot = sample_snapshot();
    snapshot.counter = SequenceCounter::resume(1);
    std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

    assert_matches!(
        load(&path),
        Err(SnapshotError::CounterBehindRecords { counter: 1, .. })
    );
}

#[test]
fn test_missing_grants_field_defaults_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{ "counter": 0, "records": [] }"#).unwrap();

    let loaded = load(&path).unwrap();
    assert_eq!(loaded, RegistrySnapshot::default());
}

#[test]
fn test_load_rejects_records_outside_limits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(
        &path,
        r#"{
            "counter": 1,
            "records": [
                { "id": 1, "owner": "alice", "registered_at": 10,
                  "title": "", "size": 0, "summary": "", "labels": [] }
            ]
        }"#,
    )
    .unwrap();

    assert_matches!(
        load(&path),
        Err(SnapshotError::InvalidRecord { content_id, source })
            if content_id == ContentId::new(1) && source.kind() == ErrorKind::InvalidInput
    );
}

#[test]
fn test_full_counter_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, format!(r#"{{ "counter": {}, "records": [] }}"#, u64::MAX)).unwrap();

    let loaded = load(&path).unwrap();
    assert!(loaded.counter.is_exhausted());
}
