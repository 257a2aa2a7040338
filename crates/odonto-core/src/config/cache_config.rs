use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Snapshot cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live of a cached snapshot, in seconds. Default: 300.
    pub ttl_secs: u64,
    /// Maximum number of cached snapshots. Default: 10_000.
    pub max_entries: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
            max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}
