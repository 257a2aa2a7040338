//! Criterion benchmarks for the snapshot builder.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use odonto_core::{Event, EventType};
use odonto_crdt::{build_snapshot, SnapshotBuilder};
use test_fixtures::{codes, event, general_note, surface_code};

const TEETH: [&str; 8] = ["11", "12", "16", "21", "26", "36", "46", "48"];

fn make_history(count: usize) -> Vec<Event> {
    (0..count)
        .map(|i| {
            let tooth = TEETH[i % TEETH.len()];
            let seq = i as i64 + 1;
            let staff = (i % 3) as i64 + 1;
            match i % 3 {
                0 => event(seq, seq, staff, tooth, EventType::ToothCodeInsert, codes(&["amf"])),
                1 => event(seq, seq, staff, tooth, EventType::ToothSurfaceCodeSet, surface_code("O", "car")),
                _ => event(seq, seq, staff, tooth, EventType::ToothGeneralNoteUpdate, general_note("check")),
            }
        })
        .collect()
}

fn bench_full_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_build");
    for size in [100usize, 1_000, 10_000] {
        let events = make_history(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &events, |b, events| {
            b.iter(|| build_snapshot(events, None));
        });
    }
    group.finish();
}

fn bench_seeded_build(c: &mut Criterion) {
    let history = make_history(5_000);
    let seed = build_snapshot(&history, None).unwrap_or_default();
    let batch: Vec<Event> = make_history(20)
        .into_iter()
        .map(|mut e| {
            e.sequence_number += 5_000;
            e.logical_timestamp += 5_000;
            e.event_id = format!("new-{}", e.sequence_number);
            e
        })
        .collect();

    c.bench_function("seeded_build_20_events", |b| {
        b.iter(|| SnapshotBuilder::with_seed(&seed).build(&batch));
    });
}

criterion_group!(benches, bench_full_build, bench_seeded_build);
criterion_main!(benches);
