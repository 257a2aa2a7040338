/// Maximum number of drafts accepted in a single append batch.
/// Batches exceeding this limit are rejected before any storage access.
pub const MAX_BATCH_SIZE: usize = 5_000;

/// Hard ceiling on the page size of an event listing, regardless of config.
pub const MAX_PAGE_SIZE: usize = 1_000;

/// Maximum length of a tooth or surface code.
pub const MAX_CODE_LEN: usize = 32;

/// Display defaults for codes missing from the surface lookup table.
pub const DEFAULT_SURFACE_COLOR: &str = "#ffffff";
pub const DEFAULT_SURFACE_PATTERN: &str = "solid";

/// Sentinel visit key used by the snapshot cache when no visit is given.
pub const NO_VISIT: i64 = 0;
