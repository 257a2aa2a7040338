//! Connection pragmas. Sizes and the busy timeout come from `StorageConfig`.

use rusqlite::Connection;

use odonto_core::config::StorageConfig;
use odonto_core::errors::OdontoResult;

use crate::to_storage_err;

/// Writer: WAL journal, NORMAL sync and enforced foreign keys.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> OdontoResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA mmap_size = {};
        PRAGMA cache_size = {};
        PRAGMA busy_timeout = {};
        PRAGMA foreign_keys = ON;
        ",
        config.mmap_size, config.cache_size, config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Readers: `query_only` with in-memory temp tables.
pub fn apply_read_pragmas(conn: &Connection, config: &StorageConfig) -> OdontoResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA query_only = ON;
        PRAGMA mmap_size = {};
        PRAGMA cache_size = {};
        PRAGMA busy_timeout = {};
        PRAGMA temp_store = MEMORY;
        ",
        config.mmap_size, config.cache_size, config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> OdontoResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
