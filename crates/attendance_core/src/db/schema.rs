//! Key-value schema creation and version check.
//!
//! The store needs a single table, so the schema is one idempotent script
//! stamped with `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const KV_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Creates `kv_entries` on a fresh file and stamps [`SCHEMA_VERSION`].
///
/// A file already at [`SCHEMA_VERSION`] is left untouched.
///
/// # Errors
/// - `SchemaTooNew` when another build stamped a higher version.
/// - `Sqlite` when the script fails; nothing is committed then.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(KV_SCHEMA)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    info!("event=db_schema module=db status=ok from_version={found} to_version={SCHEMA_VERSION}");
    Ok(())
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}
