use rusqlite::{Connection, OptionalExtension, params};
use siteplan_core::HierarchyDocument;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

mod file;
mod schema;

pub use file::{EXPORT_FILE_NAME, export_to_file, load_from_file};

const SCHEMA_VERSION: u32 = 1;

/// The single document slot. Saving overwrites it; concurrent writers race
/// with last-write-wins, same as the browser storage this replaces.
pub const STORAGE_KEY: &str = "visual-hierarchy-data";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Other error: {0}")]
    Other(String),
}

enum Backend {
    Sqlite(Connection),
    Disabled,
}

pub struct Storage {
    backend: Backend,
}

impl Storage {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        // Avoid flaky "database is locked" errors when another process
        // still holds the slot.
        let _ = conn.busy_timeout(Duration::from_millis(2_500));
        let _ = conn.pragma_update(None, "journal_mode", "WAL");
        let _ = conn.pragma_update(None, "synchronous", "NORMAL");
        let storage = Self {
            backend: Backend::Sqlite(conn),
        };
        storage.init()?;
        Ok(storage)
    }

    pub fn new_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Self {
            backend: Backend::Sqlite(conn),
        };
        storage.init()?;
        Ok(storage)
    }

    /// A storage that accepts every call as a no-op and loads nothing. Used
    /// where no durable location exists (stateless or sandboxed runs).
    pub fn disabled() -> Self {
        Self {
            backend: Backend::Disabled,
        }
    }

    /// Opens the database under the platform data directory, degrading to
    /// the disabled backend when the environment has none.
    pub fn open_default() -> Result<Self, StorageError> {
        let Some(base) = dirs::data_dir() else {
            tracing::warn!("no data directory available, persistence disabled");
            return Ok(Self::disabled());
        };
        let dir = base.join("siteplan");
        std::fs::create_dir_all(&dir)?;
        Self::open(dir.join("siteplan.db"))
    }

    fn conn(&self) -> Option<&Connection> {
        match &self.backend {
            Backend::Sqlite(conn) => Some(conn),
            Backend::Disabled => None,
        }
    }

    fn init(&self) -> Result<(), StorageError> {
        let Some(conn) = self.conn() else {
            return Ok(());
        };
        schema::create_tables(conn)?;
        schema::apply_schema_migrations(conn)
    }

    /// Saves `document` under the fixed key, replacing whatever was there.
    pub fn save(&self, document: &HierarchyDocument) -> Result<(), StorageError> {
        let Some(conn) = self.conn() else {
            tracing::debug!("save skipped, persistence disabled");
            return Ok(());
        };
        let value = serde_json::to_string(document)?;
        conn.execute(
            "INSERT INTO document (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![STORAGE_KEY, value],
        )?;
        tracing::debug!(bytes = value.len(), "document saved");
        Ok(())
    }

    /// Loads the saved document. `Ok(None)` covers both an empty slot and a
    /// stored payload that no longer parses; corruption is logged and the
    /// caller falls back to its defaults.
    pub fn load(&self) -> Result<Option<HierarchyDocument>, StorageError> {
        let Some(conn) = self.conn() else {
            return Ok(None);
        };
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM document WHERE key = ?1",
                params![STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;
        let Some(value) = value else {
            return Ok(None);
        };
        match serde_json::from_str(&value) {
            Ok(document) => Ok(Some(document)),
            Err(error) => {
                tracing::error!(%error, "stored document failed to parse, ignoring it");
                Ok(None)
            }
        }
    }

    /// Drops the saved document, if any.
    pub fn clear(&self) -> Result<(), StorageError> {
        let Some(conn) = self.conn() else {
            return Ok(());
        };
        conn.execute("DELETE FROM document WHERE key = ?1", params![STORAGE_KEY])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
