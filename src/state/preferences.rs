use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Key of the background audio preference
pub const MUSIC_ENABLED_KEY: &str = "musicEnabled";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("preference database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("could not create preference directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// How long a writer waits for another connection's lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Preferences persisted across sessions.
/// Backed by a small SQLite key/value table in the user's data directory.
///
/// Every write carries a revision. A row is only replaced by a write with a
/// higher revision, so background writes that finish out of order keep the
/// newest value.
pub struct Preferences {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl Preferences {
    /// Open (or create) the preference database at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self, PreferencesError> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PreferencesError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = open_connection(db_path)?;

        tracing::info!(path = %db_path.display(), "preference store opened");

        Ok(Preferences {
            conn,
            db_path: Some(db_path.to_path_buf()),
        })
    }

    /// A throwaway store that is never written to disk
    pub fn open_in_memory() -> Result<Self, PreferencesError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Preferences { conn, db_path: None })
    }

    /// Path of the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Whether background audio was left enabled.
    /// Anything other than a stored `"true"` reads as disabled.
    pub fn music_enabled(&self) -> Result<bool, PreferencesError> {
        read_flag(&self.conn, MUSIC_ENABLED_KEY)
    }

    /// Revision of the stored audio preference, 0 if it was never written.
    /// New writes must use a higher revision to take effect.
    pub fn music_revision(&self) -> Result<u64, PreferencesError> {
        read_revision(&self.conn, MUSIC_ENABLED_KEY)
    }

    /// Store the flag unless a write with an equal or higher revision
    /// already landed. Returns whether the row changed.
    pub fn set_music_enabled(&self, enabled: bool, revision: u64) -> Result<bool, PreferencesError> {
        write_flag(&self.conn, MUSIC_ENABLED_KEY, enabled, revision)
    }
}

/// Persist the audio preference from a background thread.
/// Opens its own connection because `rusqlite::Connection` is not `Send`.
pub async fn persist_music_enabled(
    db_path: PathBuf,
    enabled: bool,
    revision: u64,
) -> Result<bool, PreferencesError> {
    tokio::task::spawn_blocking(move || {
        let conn = open_connection(&db_path)?;
        write_flag(&conn, MUSIC_ENABLED_KEY, enabled, revision)
    })
    .await?
}

fn open_connection(db_path: &Path) -> Result<Connection, PreferencesError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<(), PreferencesError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS preferences (
            key         TEXT PRIMARY KEY,
            value       TEXT NOT NULL,
            revision    INTEGER NOT NULL DEFAULT 0,
            updated_at  INTEGER NOT NULL
        )",
        [],
    )?;
    Ok(())
}

fn read_revision(conn: &Connection, key: &str) -> Result<u64, PreferencesError> {
    let revision: Option<i64> = conn
        .query_row(
            "SELECT revision FROM preferences WHERE key = ?1",
            [key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(revision.map_or(0, |r| r.max(0) as u64))
}

fn read_flag(conn: &Connection, key: &str) -> Result<bool, PreferencesError> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM preferences WHERE key = ?1",
            [key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value.as_deref() == Some("true"))
}

fn write_flag(conn: &Connection, key: &str, enabled: bool, revision: u64) -> Result<bool, PreferencesError> {
    let changed = conn.execute(
        "INSERT INTO preferences (key, value, revision, updated_at) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            revision = excluded.revision,
            updated_at = excluded.updated_at
         WHERE excluded.revision > preferences.revision",
        rusqlite::params![key, enabled.to_string(), revision as i64, Utc::now().timestamp()],
    )?;
    if changed == 0 {
        tracing::debug!(key, revision, "skipped out-of-date preference write");
    }
    Ok(changed > 0)
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("db_path", &self.db_path)
            .finish()
    }
}
