//! The one connection that writes. Append sessions queue on its async lock.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::{Mutex, MutexGuard};

use odonto_core::config::StorageConfig;
use odonto_core::errors::OdontoResult;

use super::pragmas::apply_pragmas;
use crate::migrations;
use crate::to_storage_err;

/// A single write connection protected by an async mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection and bring the schema up to date.
    pub fn open(path: &Path, config: &StorageConfig) -> OdontoResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::prepare(conn, config)
    }

    /// Private in-memory database with the schema applied.
    pub fn open_in_memory(config: &StorageConfig) -> OdontoResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::prepare(conn, config)
    }

    fn prepare(conn: Connection, config: &StorageConfig) -> OdontoResult<Self> {
        apply_pragmas(&conn, config)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Wait for the lock, then run `f`.
    pub async fn with_conn<F, T>(&self, f: F) -> OdontoResult<T>
    where
        F: FnOnce(&Connection) -> OdontoResult<T>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }

    /// Synchronous access for non-async contexts. Fails instead of waiting
    /// when the connection is held, so it is safe inside a runtime.
    pub fn with_conn_sync<F, T>(&self, f: F) -> OdontoResult<T>
    where
        F: FnOnce(&Connection) -> OdontoResult<T>,
    {
        let guard = self
            .conn
            .try_lock()
            .map_err(|_| to_storage_err("write connection busy".to_string()))?;
        f(&guard)
    }

    /// Hold the write lock until the returned guard is dropped.
    pub async fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().await
    }
}
