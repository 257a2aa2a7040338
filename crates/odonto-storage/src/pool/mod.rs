//! One writer plus a pool of readers over the same database.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::Path;

use odonto_core::config::StorageConfig;
use odonto_core::errors::OdontoResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    ///
    /// The writer must run migrations before readers are opened: read
    /// connections are read-only and cannot create the schema.
    pub fn open(path: &Path, config: &StorageConfig) -> OdontoResult<Self> {
        let writer = WriteConnection::open(path, config)?;
        let readers = ReadPool::open(path, config)?;
        Ok(Self { writer, readers })
    }

    /// Throwaway pool for tests. The reader holds its own empty database,
    /// so `StorageEngine` serves in-memory reads from the writer.
    pub fn open_in_memory(config: &StorageConfig) -> OdontoResult<Self> {
        let writer = WriteConnection::open_in_memory(config)?;
        let readers = ReadPool::open_in_memory(1, config)?;
        Ok(Self { writer, readers })
    }
}
