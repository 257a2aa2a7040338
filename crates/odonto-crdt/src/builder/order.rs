//! Deduplication and total merge order.

use std::cmp::Ordering;
use std::collections::HashSet;

use odonto_core::Event;

/// Deduplicate by `event_id` (first occurrence wins) and sort into merge order.
///
/// Events with an empty `event_id` are never treated as duplicates of each
/// other. The order is `(logical_timestamp, created_by_staff_id)`, with
/// `(sequence_number, event_id)` breaking residual ties so that any input
/// permutation yields the same sequence.
pub fn merge_order(events: &[Event]) -> Vec<&Event> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(events.len());
    let mut ordered: Vec<&Event> = events
        .iter()
        .filter(|e| e.event_id.is_empty() || seen.insert(e.event_id.as_str()))
        .collect();
    ordered.sort_by(|a, b| compare(a, b));
    ordered
}

fn compare(a: &Event, b: &Event) -> Ordering {
    (a.logical_timestamp, a.created_by_staff_id, a.sequence_number)
        .cmp(&(b.logical_timestamp, b.created_by_staff_id, b.sequence_number))
        .then_with(|| a.event_id.cmp(&b.event_id))
}
