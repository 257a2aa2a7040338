//! Explicit write sessions: one `BEGIN IMMEDIATE` transaction on the single
//! write connection, held for the whole append batch.

use rusqlite::Connection;
use tokio::sync::MutexGuard;

use odonto_core::errors::OdontoResult;
use odonto_core::models::PatientCounters;
use odonto_core::Event;

use crate::queries::event_ops;
use crate::to_storage_err;

/// An open write transaction.
///
/// Call [`WriteSession::finish`] with the outcome of the work done inside
/// the session: `Ok` commits, `Err` rolls back. A session dropped without
/// `finish` rolls back.
pub struct WriteSession<'a> {
    conn: MutexGuard<'a, Connection>,
    open: bool,
}

impl<'a> WriteSession<'a> {
    pub(crate) fn begin(conn: MutexGuard<'a, Connection>) -> OdontoResult<Self> {
        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| to_storage_err(format!("failed to begin immediate transaction: {e}")))?;
        Ok(Self { conn, open: true })
    }

    /// Counter maxima as seen inside the transaction.
    pub fn counters(&self, institution_id: i64, patient_id: i64) -> OdontoResult<PatientCounters> {
        event_ops::counters(&self.conn, institution_id, patient_id)
    }

    pub fn insert_events(&self, events: &[Event]) -> OdontoResult<usize> {
        event_ops::insert_events(&self.conn, events)
    }

    /// Commit on `Ok`, roll back on `Err`, and pass the result through.
    /// A failed commit is rolled back and reported.
    pub fn finish<T>(mut self, result: OdontoResult<T>) -> OdontoResult<T> {
        self.open = false;
        match result {
            Ok(value) => {
                if let Err(e) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(to_storage_err(format!("failed to commit: {e}")));
                }
                Ok(value)
            }
            Err(err) => {
                if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                    tracing::warn!(error = %e, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

impl Drop for WriteSession<'_> {
    fn drop(&mut self) {
        if self.open {
            tracing::warn!("write session dropped without finish, rolling back");
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                tracing::warn!(error = %e, "rollback failed");
            }
        }
    }
}
