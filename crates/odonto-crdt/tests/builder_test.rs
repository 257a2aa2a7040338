//! Snapshot builder behavior: golden scenarios and merge rules.

use odonto_core::errors::{BuildError, PayloadError};
use odonto_core::{EventType, Snapshot, Surface};
use odonto_crdt::{build_snapshot, merge_order, SnapshotBuilder};
use serde_json::json;
use test_fixtures::{
    codes, event, general_note, list_scenarios, surface_code, surface_note, surface_only,
    Scenario,
};

#[test]
fn golden_scenarios_produce_expected_teeth() {
    let scenarios = list_scenarios();
    assert!(!scenarios.is_empty());
    for path in scenarios {
        let file = path.file_name().unwrap().to_string_lossy().to_string();
        let scenario = Scenario::load(&file);
        let snapshot = build_snapshot(&scenario.to_events(), None).unwrap();
        assert_eq!(snapshot.teeth, scenario.expected, "scenario {}", scenario.name);
    }
}

#[test]
fn whole_tooth_insert_lists_code() {
    let events = vec![event(1, 10, 1, "11", EventType::ToothCodeInsert, codes(&["amf"]))];
    let snapshot = build_snapshot(&events, None).unwrap();
    assert_eq!(snapshot.tooth("11").unwrap().whole_tooth_code, ["amf"]);
    assert_eq!(snapshot.last_event_sequence, 1);
    assert_eq!(snapshot.max_logical_timestamp, 10);
}

#[test]
fn empty_note_is_an_explicit_clear() {
    let events = vec![
        event(1, 20, 1, "11", EventType::ToothGeneralNoteUpdate, general_note("cavity")),
        event(2, 30, 1, "11", EventType::ToothGeneralNoteUpdate, general_note("")),
    ];
    let snapshot = build_snapshot(&events, None).unwrap();
    assert_eq!(snapshot.tooth("11").unwrap().general_notes, "");
}

#[test]
fn surface_code_carries_display_metadata() {
    let events = vec![event(1, 10, 1, "11", EventType::ToothSurfaceCodeSet, surface_code("O", "car"))];
    let snapshot = build_snapshot(&events, None).unwrap();
    let surface = &snapshot.tooth("11").unwrap().surfaces[0];
    assert_eq!(surface.surface, Surface::Occlusal);
    assert_eq!(surface.code, "car");
    assert_eq!(surface.notes, "");
    assert_eq!(surface.display_name, "Caries");
    assert_eq!(surface.color, "#ff0000");
}

#[test]
fn equal_timestamps_resolve_to_higher_staff_in_any_order() {
    let a = event(1, 50, 1, "11", EventType::ToothGeneralNoteUpdate, general_note("from one"));
    let b = event(2, 50, 2, "11", EventType::ToothGeneralNoteUpdate, general_note("from two"));

    let forward = build_snapshot(&[a.clone(), b.clone()], None).unwrap();
    let backward = build_snapshot(&[b, a], None).unwrap();
    assert_eq!(forward.tooth("11").unwrap().general_notes, "from two");
    assert_eq!(forward, backward);
}

#[test]
fn code_reinserted_after_removal_is_active() {
    let events = vec![
        event(1, 100, 1, "11", EventType::ToothCodeInsert, codes(&["amf"])),
        event(2, 200, 1, "11", EventType::ToothCodeRemove, codes(&["amf"])),
        event(3, 300, 1, "11", EventType::ToothCodeInsert, codes(&["amf"])),
    ];
    let snapshot = build_snapshot(&events, None).unwrap();
    assert_eq!(snapshot.tooth("11").unwrap().whole_tooth_code, ["amf"]);

    let stale = vec![
        event(1, 200, 1, "11", EventType::ToothCodeRemove, codes(&["amf"])),
        event(2, 150, 1, "11", EventType::ToothCodeInsert, codes(&["amf"])),
    ];
    let snapshot = build_snapshot(&stale, None).unwrap();
    assert!(snapshot.tooth("11").unwrap().whole_tooth_code.is_empty());
}

#[test]
fn reset_dominates_earlier_writes_regardless_of_input_order() {
    let events = vec![
        event(4, 200, 1, "11", EventType::ToothReset, json!({})),
        event(1, 100, 1, "11", EventType::ToothCodeInsert, codes(&["crn"])),
        event(2, 110, 2, "11", EventType::ToothSurfaceCodeSet, surface_code("M", "car")),
        event(3, 120, 1, "11", EventType::ToothGeneralNoteUpdate, general_note("x")),
    ];
    let snapshot = build_snapshot(&events, None).unwrap();
    let tooth = snapshot.tooth("11").unwrap();
    assert!(tooth.whole_tooth_code.is_empty());
    assert!(tooth.surfaces.is_empty());
    assert_eq!(tooth.general_notes, "");
}

#[test]
fn surface_code_set_drops_notes_older_than_the_event() {
    let note = event(1, 5, 1, "11", EventType::ToothSurfaceNoteUpdate, surface_note("O", "deep"));
    let code = event(2, 6, 1, "11", EventType::ToothSurfaceCodeSet, surface_code("O", "car"));

    for events in [vec![note.clone(), code.clone()], vec![code, note]] {
        let snapshot = build_snapshot(&events, None).unwrap();
        let surface = &snapshot.tooth("11").unwrap().surfaces[0];
        assert_eq!(surface.code, "car");
        assert_eq!(surface.notes, "");
    }
}

#[test]
fn surface_code_set_keeps_notes_newer_than_the_event() {
    let code = event(1, 6, 1, "11", EventType::ToothSurfaceCodeSet, surface_code("O", "car"));
    let note = event(2, 7, 1, "11", EventType::ToothSurfaceNoteUpdate, surface_note("O", "deep"));

    for events in [vec![code.clone(), note.clone()], vec![note, code]] {
        let snapshot = build_snapshot(&events, None).unwrap();
        let surface = &snapshot.tooth("11").unwrap().surfaces[0];
        assert_eq!(surface.code, "car");
        assert_eq!(surface.notes, "deep");
        assert_eq!(surface.logical_timestamp, 7);
    }
}

#[test]
fn sequence_gaps_do_not_affect_the_result() {
    let events = vec![
        event(1, 10, 1, "11", EventType::ToothCodeInsert, codes(&["amf"])),
        event(2, 20, 1, "12", EventType::ToothCodeInsert, codes(&["crn"])),
        event(5, 30, 1, "11", EventType::ToothSurfaceCodeSet, surface_code("D", "car")),
        event(6, 40, 1, "12", EventType::ToothCodeRemove, codes(&["crn"])),
    ];
    let snapshot = build_snapshot(&events, None).unwrap();
    assert_eq!(snapshot.tooth("11").unwrap().surfaces.len(), 1);
    assert!(snapshot.tooth("12").unwrap().whole_tooth_code.is_empty());
    assert_eq!(snapshot.last_event_sequence, 6);
    assert_eq!(snapshot.max_logical_timestamp, 40);
}

#[test]
fn seeded_build_converges_with_single_pass() {
    let a = event(1, 10, 1, "11", EventType::ToothCodeInsert, codes(&["amf"]));
    let b = event(2, 20, 2, "11", EventType::ToothSurfaceCodeSet, surface_code("O", "car"));
    let c = event(3, 30, 1, "11", EventType::ToothSurfaceNoteUpdate, surface_note("O", "deep"));

    let seed = build_snapshot(&[a.clone(), b.clone()], None).unwrap();
    let incremental = SnapshotBuilder::with_seed(&seed).build(&[c.clone()]).unwrap();
    let full = build_snapshot(&[a, b, c], None).unwrap();
    assert_eq!(incremental, full);
}

#[test]
fn seed_counters_survive_an_empty_batch() {
    let seed = Snapshot {
        last_event_sequence: 9,
        max_logical_timestamp: 90,
        ..Snapshot::empty()
    };
    let snapshot = build_snapshot(&[], Some(&seed)).unwrap();
    assert_eq!(snapshot.last_event_sequence, 9);
    assert_eq!(snapshot.max_logical_timestamp, 90);
    assert!(snapshot.teeth.is_empty());
}

#[test]
fn surface_remove_deletes_entry() {
    let events = vec![
        event(1, 10, 1, "11", EventType::ToothSurfaceCodeSet, surface_code("V", "car")),
        event(2, 20, 1, "11", EventType::ToothSurfaceCodeRemove, surface_only("V")),
    ];
    let snapshot = build_snapshot(&events, None).unwrap();
    assert!(snapshot.tooth("11").unwrap().surfaces.is_empty());
}

#[test]
fn duplicate_deliveries_apply_once() {
    let insert = event(1, 10, 1, "11", EventType::ToothCodeInsert, codes(&["amf"]));
    let remove = event(2, 20, 1, "11", EventType::ToothCodeRemove, codes(&["amf"]));
    let once = build_snapshot(&[insert.clone(), remove.clone()], None).unwrap();
    let twice = build_snapshot(&[remove.clone(), insert.clone(), remove, insert], None).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn events_without_id_are_never_deduplicated() {
    let mut first = event(1, 10, 1, "11", EventType::ToothCodeInsert, codes(&["amf"]));
    let mut second = event(2, 20, 1, "11", EventType::ToothCodeInsert, codes(&["crn"]));
    first.event_id.clear();
    second.event_id.clear();
    let events = [first, second];
    assert_eq!(merge_order(&events).len(), 2);
}

#[test]
fn first_occurrence_wins_on_duplicate_id() {
    let kept = event(1, 10, 1, "11", EventType::ToothCodeInsert, codes(&["amf"]));
    let mut shadow = event(1, 10, 1, "11", EventType::ToothCodeInsert, codes(&["crn"]));
    shadow.event_id = kept.event_id.clone();
    let snapshot = build_snapshot(&[kept, shadow], None).unwrap();
    assert_eq!(snapshot.tooth("11").unwrap().whole_tooth_code, ["amf"]);
}

#[test]
fn malformed_payload_aborts_the_build() {
    let events = vec![
        event(1, 10, 1, "11", EventType::ToothCodeInsert, codes(&["amf"])),
        event(2, 20, 1, "11", EventType::ToothSurfaceCodeSet, surface_code("X", "car")),
    ];
    let err = build_snapshot(&events, None).unwrap_err();
    let BuildError::MalformedPayload { event_id, source, .. } = err;
    assert_eq!(event_id, "evt-2");
    assert_eq!(source, PayloadError::InvalidSurface("X".into()));
}
