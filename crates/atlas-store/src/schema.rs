//! Schema of the registry database.
//!
//! The store needs a single key-value table.  Its layout is versioned with
//! SQLite's `user_version` header field so a later layout can be detected;
//! a file written by a newer Atlas is refused instead of being rewritten.

use rusqlite::{Connection, TransactionBehavior};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Layout version written by this build.
pub const SCHEMA_VERSION: i32 = 1;

const COLLECTIONS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS collections (
        key        TEXT PRIMARY KEY,
        payload    TEXT NOT NULL,
        updated_at INTEGER NOT NULL
    );
";

/// Layout version recorded in the database header (0 for a new file).
pub fn version(conn: &Connection) -> StoreResult<i32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Create the `collections` table if needed and stamp the layout version.
///
/// Safe to call on every open.
pub fn prepare(conn: &mut Connection) -> StoreResult<()> {
    let found = version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        debug!(version = found, "schema up to date");
        return Ok(());
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute_batch(COLLECTIONS_TABLE)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    info!(from = found, to = SCHEMA_VERSION, "schema prepared");
    Ok(())
}
