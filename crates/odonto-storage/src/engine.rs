//! StorageEngine: owns the ConnectionPool, implements the event log, snapshot
//! store and patient resolver seams, and opens write sessions.

use std::path::Path;

use rusqlite::Connection;

use odonto_core::config::StorageConfig;
use odonto_core::errors::{NotFoundError, OdontoResult};
use odonto_core::models::{EventFilter, EventPage, PatientCounters};
use odonto_core::traits::{IEventLog, IPatientResolver, ISnapshotStore};
use odonto_core::{Event, Snapshot, StoredSnapshot};

use crate::pool::ConnectionPool;
use crate::queries::{event_ops, patient_ops, snapshot_ops};
use crate::session::WriteSession;

/// The main storage engine.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open the database named by `config.db_path`.
    pub fn open(config: &StorageConfig) -> OdontoResult<Self> {
        Self::open_path(Path::new(&config.db_path), config)
    }

    /// Open a file-backed engine at an explicit path.
    pub fn open_path(path: &Path, config: &StorageConfig) -> OdontoResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        tracing::info!(path = %path.display(), readers = pool.readers.size(), "opened storage");
        Ok(Self {
            pool,
            use_read_pool: true,
        })
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> OdontoResult<Self> {
        let pool = ConnectionPool::open_in_memory(&StorageConfig::default())?;
        Ok(Self {
            pool,
            use_read_pool: false,
        })
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Start a write session. Waits for any session already in progress.
    pub async fn begin(&self) -> OdontoResult<WriteSession<'_>> {
        let conn = self.pool.writer.lock().await;
        WriteSession::begin(conn)
    }

    /// Register a patient, returning its numeric id.
    pub async fn register_patient(&self, uuid: &str, institution_id: i64) -> OdontoResult<i64> {
        self.pool
            .writer
            .with_conn(|conn| patient_ops::register_patient(conn, uuid, institution_id))
            .await
    }

    /// Execute a read-only query on the best available connection.
    /// File-backed: uses the read pool (no writer contention).
    /// In-memory: uses the writer (read pool is isolated).
    async fn with_reader<F, T>(&self, f: F) -> OdontoResult<T>
    where
        F: FnOnce(&Connection) -> OdontoResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f).await
        }
    }
}

impl IEventLog for StorageEngine {
    async fn counters(&self, institution_id: i64, patient_id: i64) -> OdontoResult<PatientCounters> {
        self.with_reader(|conn| event_ops::counters(conn, institution_id, patient_id))
            .await
    }

    async fn max_sequence(&self, institution_id: i64, patient_id: i64) -> OdontoResult<i64> {
        self.with_reader(|conn| event_ops::max_sequence(conn, institution_id, patient_id))
            .await
    }

    async fn events_up_to(
        &self,
        institution_id: i64,
        patient_id: i64,
        max_sequence: i64,
    ) -> OdontoResult<Vec<Event>> {
        self.with_reader(|conn| event_ops::events_up_to(conn, institution_id, patient_id, max_sequence))
            .await
    }

    async fn events_between(
        &self,
        institution_id: i64,
        patient_id: i64,
        after: i64,
        before: i64,
    ) -> OdontoResult<Vec<Event>> {
        self.with_reader(|conn| {
            event_ops::events_between(conn, institution_id, patient_id, after, before)
        })
        .await
    }

    async fn list_events(
        &self,
        institution_id: i64,
        patient_id: i64,
        filter: &EventFilter,
    ) -> OdontoResult<EventPage> {
        self.with_reader(|conn| event_ops::list_events(conn, institution_id, patient_id, filter))
            .await
    }
}

impl ISnapshotStore for StorageEngine {
    async fn get_snapshot(
        &self,
        institution_id: i64,
        patient_id: i64,
    ) -> OdontoResult<Option<StoredSnapshot>> {
        self.with_reader(|conn| snapshot_ops::get_snapshot(conn, institution_id, patient_id))
            .await
    }

    async fn upsert_snapshot(
        &self,
        institution_id: i64,
        patient_id: i64,
        snapshot: &Snapshot,
    ) -> OdontoResult<()> {
        self.pool
            .writer
            .with_conn(|conn| snapshot_ops::upsert_snapshot(conn, institution_id, patient_id, snapshot))
            .await
    }
}

impl IPatientResolver for StorageEngine {
    async fn resolve_patient(&self, patient_uuid: &str, institution_id: i64) -> OdontoResult<i64> {
        self.with_reader(|conn| patient_ops::find_patient(conn, patient_uuid, institution_id))
            .await?
            .ok_or_else(|| {
                NotFoundError::Patient {
                    uuid: patient_uuid.to_string(),
                    institution_id,
                }
                .into()
            })
    }
}
