//! Snapshot cache keyed by `(institution, patient, visit)`.
//!
//! moka-backed, TTL and capacity from [`CacheConfig`]. Entries may lag the
//! log; readers that need authority check the store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::sync::Cache;

use odonto_core::config::CacheConfig;
use odonto_core::constants::NO_VISIT;
use odonto_core::Snapshot;

/// Cache key. Reads without a visit share the [`NO_VISIT`] slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub institution_id: i64,
    pub patient_id: i64,
    pub visit_id: i64,
}

impl CacheKey {
    pub fn new(institution_id: i64, patient_id: i64, visit_id: Option<i64>) -> Self {
        Self {
            institution_id,
            patient_id,
            visit_id: visit_id.unwrap_or(NO_VISIT),
        }
    }
}

/// Snapshot cache with hit/miss counters.
pub struct SnapshotCache {
    cache: Cache<CacheKey, Arc<Snapshot>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SnapshotCache {
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl())
            .support_invalidation_closures()
            .build();
        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<Snapshot>> {
        let result = self.cache.get(key);
        if result.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    pub fn insert(&self, key: CacheKey, snapshot: Arc<Snapshot>) {
        self.cache.insert(key, snapshot);
    }

    pub fn invalidate(&self, key: &CacheKey) {
        self.cache.invalidate(key);
    }

    /// Drop every visit entry of one patient.
    pub fn invalidate_patient(&self, institution_id: i64, patient_id: i64) {
        let result = self.cache.invalidate_entries_if(move |key, _| {
            key.institution_id == institution_id && key.patient_id == patient_id
        });
        if let Err(e) = result {
            tracing::warn!(institution_id, patient_id, error = %e, "cache invalidation failed");
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Fraction of lookups served from cache (0.0 before any lookup).
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Approximate number of live entries.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
