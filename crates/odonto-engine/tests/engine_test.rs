//! End-to-end engine tests over an in-memory store.

use std::sync::Arc;

use odonto_core::config::{CacheConfig, StorageConfig};
use odonto_core::errors::{NotFoundError, OdontoError, ValidationError};
use odonto_core::models::{EventFilter, SnapshotSource};
use odonto_core::traits::{IEventLog, ISnapshotStore};
use odonto_core::{Event, EventType};
use odonto_crdt::build_snapshot;
use odonto_engine::{incremental, OdontogramEngine, SnapshotCache};
use odonto_storage::StorageEngine;
use test_fixtures::{
    codes, draft, event, general_note, staff, surface_code, surface_note, INSTITUTION_ID,
    PATIENT_UUID,
};

async fn engine() -> (OdontogramEngine, i64) {
    let storage = StorageEngine::open_in_memory().unwrap();
    let patient_id = storage.register_patient(PATIENT_UUID, INSTITUTION_ID).await.unwrap();
    let engine = OdontogramEngine::new(
        Arc::new(storage),
        SnapshotCache::new(&CacheConfig::default()),
    );
    (engine, patient_id)
}

/// Insert events directly, bypassing the writer and its side effects.
async fn insert_raw(engine: &OdontogramEngine, patient_id: i64, events: &mut [Event]) {
    for e in events.iter_mut() {
        e.patient_id = patient_id;
    }
    let session = engine.storage().begin().await.unwrap();
    let result = session.insert_events(events);
    session.finish(result).unwrap();
}

#[tokio::test]
async fn patient_without_events_reads_empty() {
    let (engine, patient_id) = engine().await;
    let view = engine.get_snapshot(INSTITUTION_ID, patient_id, None, None).await.unwrap();
    assert_eq!(view.source, SnapshotSource::Empty);
    assert_eq!(view.max_sequence_number, 0);
    assert!(view.snapshot.teeth.is_empty());
    assert!(engine
        .storage()
        .get_snapshot(INSTITUTION_ID, patient_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn append_assigns_contiguous_counters_above_maxima() {
    let (engine, patient_id) = engine().await;
    let mut history = vec![
        event(1, 10, 1, "11", EventType::ToothCodeInsert, codes(&["amf"])),
        event(4, 40, 1, "11", EventType::ToothCodeInsert, codes(&["crn"])),
    ];
    insert_raw(&engine, patient_id, &mut history).await;

    let events = engine
        .append_events(
            &staff(7),
            &[
                draft("21", EventType::ToothGeneralNoteUpdate, general_note("a")),
                draft("22", EventType::ToothGeneralNoteUpdate, general_note("b")),
            ],
        )
        .await
        .unwrap();

    let seqs: Vec<i64> = events.iter().map(|e| e.sequence_number).collect();
    let stamps: Vec<i64> = events.iter().map(|e| e.logical_timestamp).collect();
    assert_eq!(seqs, [5, 6]);
    assert_eq!(stamps, [41, 42]);
    assert!(events.iter().all(|e| e.created_by_staff_id == 7 && e.patient_id == patient_id));
}

#[tokio::test]
async fn append_then_read_serves_refreshed_store() {
    let (engine, patient_id) = engine().await;
    engine
        .append_events(
            &staff(1),
            &[draft("11", EventType::ToothCodeInsert, codes(&["amf"]))],
        )
        .await
        .unwrap();

    let stored = engine
        .storage()
        .get_snapshot(INSTITUTION_ID, patient_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.snapshot.last_event_sequence, 1);

    let view = engine.get_snapshot(INSTITUTION_ID, patient_id, None, None).await.unwrap();
    assert_eq!(view.source, SnapshotSource::Store);
    assert_eq!(view.snapshot.tooth("11").unwrap().whole_tooth_code, ["amf"]);

    let again = engine.get_snapshot(INSTITUTION_ID, patient_id, None, None).await.unwrap();
    assert_eq!(again.source, SnapshotSource::Cache);
    assert_eq!(again.max_sequence_number, 1);
}

#[tokio::test]
async fn stale_store_is_rebuilt_and_persisted() {
    let (engine, patient_id) = engine().await;
    engine
        .append_events(&staff(1), &[draft("11", EventType::ToothCodeInsert, codes(&["amf"]))])
        .await
        .unwrap();

    let mut late = vec![event(2, 2, 1, "11", EventType::ToothCodeRemove, codes(&["amf"]))];
    insert_raw(&engine, patient_id, &mut late).await;

    let view = engine.get_snapshot(INSTITUTION_ID, patient_id, None, None).await.unwrap();
    assert_eq!(view.source, SnapshotSource::Rebuilt);
    assert_eq!(view.max_sequence_number, 2);
    assert!(view.snapshot.tooth("11").unwrap().whole_tooth_code.is_empty());

    let stored = engine
        .storage()
        .get_snapshot(INSTITUTION_ID, patient_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.snapshot.last_event_sequence, 2);
}

#[tokio::test]
async fn append_invalidates_cached_snapshot() {
    let (engine, patient_id) = engine().await;
    engine
        .append_events(&staff(1), &[draft("11", EventType::ToothCodeInsert, codes(&["amf"]))])
        .await
        .unwrap();
    engine.get_snapshot(INSTITUTION_ID, patient_id, None, None).await.unwrap();
    engine.get_snapshot(INSTITUTION_ID, patient_id, Some(3), None).await.unwrap();

    engine
        .append_events(&staff(1), &[draft("11", EventType::ToothCodeInsert, codes(&["crn"]))])
        .await
        .unwrap();

    for visit in [None, Some(3)] {
        let view = engine.get_snapshot(INSTITUTION_ID, patient_id, visit, None).await.unwrap();
        assert_ne!(view.source, SnapshotSource::Cache);
        assert_eq!(view.snapshot.tooth("11").unwrap().whole_tooth_code, ["amf", "crn"]);
    }
}

#[tokio::test]
async fn historical_read_stops_at_bound_and_is_not_stored() {
    let (engine, patient_id) = engine().await;
    for code in ["amf", "crn", "sea"] {
        engine
            .append_events(&staff(1), &[draft("11", EventType::ToothCodeInsert, codes(&[code]))])
            .await
            .unwrap();
    }

    let view = engine.get_snapshot(INSTITUTION_ID, patient_id, None, Some(2)).await.unwrap();
    assert_eq!(view.source, SnapshotSource::Historical);
    assert_eq!(view.max_sequence_number, 2);
    assert_eq!(view.snapshot.tooth("11").unwrap().whole_tooth_code, ["amf", "crn"]);

    let current = engine.get_snapshot(INSTITUTION_ID, patient_id, None, None).await.unwrap();
    assert_eq!(current.snapshot.last_event_sequence, 3);
    assert_eq!(current.snapshot.tooth("11").unwrap().whole_tooth_code.len(), 3);
}

#[tokio::test]
async fn incremental_batches_converge_with_full_rebuild() {
    let (engine, patient_id) = engine().await;
    engine
        .append_events(
            &staff(1),
            &[
                draft("11", EventType::ToothCodeInsert, codes(&["amf"])),
                draft("11", EventType::ToothSurfaceCodeSet, surface_code("O", "car")),
            ],
        )
        .await
        .unwrap();
    engine
        .append_events(
            &staff(2),
            &[draft("11", EventType::ToothSurfaceNoteUpdate, surface_note("O", "deep"))],
        )
        .await
        .unwrap();

    let stored = engine
        .storage()
        .get_snapshot(INSTITUTION_ID, patient_id)
        .await
        .unwrap()
        .unwrap();
    let all = engine
        .storage()
        .events_up_to(INSTITUTION_ID, patient_id, 3)
        .await
        .unwrap();
    assert_eq!(stored.snapshot, build_snapshot(&all, None).unwrap());
}

#[tokio::test]
async fn refresh_bridges_events_missing_from_the_store() {
    let (engine, patient_id) = engine().await;
    engine
        .append_events(&staff(1), &[draft("11", EventType::ToothCodeInsert, codes(&["amf"]))])
        .await
        .unwrap();

    let mut gap = vec![
        event(2, 2, 1, "12", EventType::ToothCodeInsert, codes(&["crn"])),
        event(3, 3, 1, "13", EventType::ToothCodeInsert, codes(&["sea"])),
    ];
    insert_raw(&engine, patient_id, &mut gap).await;

    let mut fresh = vec![event(4, 4, 1, "14", EventType::ToothCodeInsert, codes(&["inl"]))];
    insert_raw(&engine, patient_id, &mut fresh).await;
    let snapshot = incremental::apply_appended(engine.storage(), INSTITUTION_ID, patient_id, &fresh)
        .await
        .unwrap()
        .unwrap();

    let teeth: Vec<&str> = snapshot.teeth.keys().map(String::as_str).collect();
    assert_eq!(teeth, ["11", "12", "13", "14"]);
    assert_eq!(snapshot.last_event_sequence, 4);
}

#[tokio::test]
async fn first_stored_snapshot_includes_earlier_history() {
    let (engine, patient_id) = engine().await;
    let mut history = vec![
        event(1, 1, 1, "11", EventType::ToothCodeInsert, codes(&["amf"])),
        event(2, 2, 1, "12", EventType::ToothCodeInsert, codes(&["crn"])),
    ];
    insert_raw(&engine, patient_id, &mut history).await;
    assert!(engine
        .storage()
        .get_snapshot(INSTITUTION_ID, patient_id)
        .await
        .unwrap()
        .is_none());

    engine
        .append_events(&staff(1), &[draft("21", EventType::ToothCodeInsert, codes(&["sea"]))])
        .await
        .unwrap();

    let stored = engine
        .storage()
        .get_snapshot(INSTITUTION_ID, patient_id)
        .await
        .unwrap()
        .unwrap();
    let teeth: Vec<&str> = stored.snapshot.teeth.keys().map(String::as_str).collect();
    assert_eq!(teeth, ["11", "12", "21"]);
    assert_eq!(stored.snapshot.last_event_sequence, 3);
    assert_eq!(stored.snapshot.tooth("12").unwrap().whole_tooth_code, ["crn"]);
}

#[tokio::test]
async fn invalid_batches_write_nothing() {
    let (engine, patient_id) = engine().await;
    let mut other = draft("11", EventType::ToothReset, serde_json::Value::Null);
    other.patient_uuid = Some("0d9b1c3a-7e4f-4a8b-9c2d-1e3f5a7b9c0d".into());

    let err = engine
        .append_events(
            &staff(1),
            &[draft("11", EventType::ToothCodeInsert, codes(&["amf"])), other],
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OdontoError::ValidationError(ValidationError::PatientMismatch { .. })
    ));
    assert_eq!(
        engine.current_sequence(INSTITUTION_ID, patient_id).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn unknown_patient_is_not_found() {
    let (engine, _) = engine().await;
    let mut d = draft("11", EventType::ToothReset, serde_json::Value::Null);
    d.patient_uuid = Some("0d9b1c3a-7e4f-4a8b-9c2d-1e3f5a7b9c0d".into());
    let err = engine.append_events(&staff(1), &[d]).await.unwrap_err();
    assert!(matches!(err, OdontoError::NotFound(NotFoundError::Patient { .. })));
}

#[tokio::test]
async fn list_events_pages_in_sequence_order() {
    let (engine, patient_id) = engine().await;
    let drafts: Vec<_> = (0..5)
        .map(|i| draft("11", EventType::ToothGeneralNoteUpdate, general_note(&format!("n{i}"))))
        .collect();
    engine.append_events(&staff(1), &drafts).await.unwrap();

    let filter = EventFilter {
        limit: 2,
        offset: 2,
        ..EventFilter::default()
    };
    let page = engine.list_events(INSTITUTION_ID, patient_id, &filter).await.unwrap();
    assert_eq!(page.total, 5);
    let seqs: Vec<i64> = page.events.iter().map(|e| e.sequence_number).collect();
    assert_eq!(seqs, [3, 4]);
    assert_eq!(page.max_sequence_number, 5);
}

#[tokio::test]
async fn file_backed_engine_reads_through_the_pool() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        db_path: dir.path().join("chart.db").display().to_string(),
        ..StorageConfig::default()
    };
    let storage = StorageEngine::open(&config).unwrap();
    let patient_id = storage.register_patient(PATIENT_UUID, INSTITUTION_ID).await.unwrap();
    let engine = OdontogramEngine::new(
        Arc::new(storage),
        SnapshotCache::new(&CacheConfig::default()),
    );

    engine
        .append_events(&staff(1), &[draft("11", EventType::ToothCodeInsert, codes(&["amf"]))])
        .await
        .unwrap();

    let view = engine.get_snapshot(INSTITUTION_ID, patient_id, None, None).await.unwrap();
    assert_eq!(view.source, SnapshotSource::Store);
    assert_eq!(view.max_sequence_number, 1);
    assert_eq!(view.snapshot.tooth("11").unwrap().whole_tooth_code, ["amf"]);
}
