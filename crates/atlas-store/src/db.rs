//! Shared SQLite handle for the registry store.
//!
//! One connection serves the whole process.  Work on it runs on tokio's
//! blocking pool so async callers never stall on disk I/O.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::schema;

/// Cloneable handle to the registry database.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (creating if needed) the database file at `path`, ready for use.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = tokio::task::spawn_blocking(move || -> StoreResult<Connection> {
            info!(path = %path.display(), "opening registry database");
            let mut conn = Connection::open(&path)?;
            // File databases only; in-memory ones cannot use WAL.
            conn.pragma_update(None, "journal_mode", "WAL")?;
            configure(&mut conn)?;
            Ok(conn)
        })
        .await??;
        Ok(Self::wrap(conn))
    }

    /// A private in-memory database, ready for use.
    pub fn in_memory() -> StoreResult<Self> {
        debug!("opening in-memory registry database");
        let mut conn = Connection::open_in_memory()?;
        configure(&mut conn)?;
        Ok(Self::wrap(conn))
    }

    /// Run `f` against the connection on the blocking pool.
    pub async fn execute<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.execute_mut(move |conn| f(conn)).await
    }

    /// Like [`Database::execute`], with the mutable access transactions need.
    pub async fn execute_mut<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| StoreError::TaskJoin("registry connection lock poisoned".into()))?;
            f(&mut guard)
        })
        .await?
    }

    fn wrap(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

/// Connection settings shared by file and in-memory databases, then the
/// schema step.
fn configure(conn: &mut Connection) -> StoreResult<()> {
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;
    schema::prepare(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn count_collections(db: &Database) -> i64 {
        db.execute(|conn| {
            Ok(conn.query_row("SELECT count(*) FROM collections", [], |row| row.get(0))?)
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn in_memory_database_is_ready() {
        let db = Database::in_memory().unwrap();
        assert_eq!(count_collections(&db).await, 0);
    }

    #[tokio::test]
    async fn file_database_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("atlas.db")).await.unwrap();
        let mode: String = db
            .execute(|conn| Ok(conn.pragma_query_value(None, "journal_mode", |row| row.get(0))?))
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn failed_transaction_leaves_no_rows() {
        let db = Database::in_memory().unwrap();

        let result: StoreResult<()> = db
            .execute_mut(|conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "INSERT INTO collections (key, payload, updated_at) VALUES ('k', '[]', 0)",
                    [],
                )?;
                Err(StoreError::TaskJoin("abandoned".into()))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(count_collections(&db).await, 0);
    }
}
