// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "odontogram.db";
pub const DEFAULT_MMAP_SIZE: u64 = 268_435_456; // 256 MB
pub const DEFAULT_CACHE_SIZE: i64 = -64_000; // 64 MB (negative = KB)
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Snapshot cache ---
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;

// --- Server ---
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_MAX_PAGE_SIZE: usize = 1_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
