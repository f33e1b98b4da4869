use super::*;

const TABLE_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS document (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )",
];

pub(super) fn create_tables(conn: &Connection) -> Result<(), StorageError> {
    for statement in TABLE_STATEMENTS {
        conn.execute(statement, [])?;
    }
    Ok(())
}

pub(super) fn apply_schema_migrations(conn: &Connection) -> Result<(), StorageError> {
    let stored_version = schema_version(conn)?;

    if stored_version > SCHEMA_VERSION {
        return Err(StorageError::Other(format!(
            "Unsupported database schema version: {stored_version} (max supported: {SCHEMA_VERSION})"
        )));
    }

    if stored_version < SCHEMA_VERSION {
        set_schema_version(conn, SCHEMA_VERSION)?;
    }
    Ok(())
}

pub(super) fn schema_version(conn: &Connection) -> Result<u32, StorageError> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(version.max(0) as u32)
}

fn set_schema_version(conn: &Connection, version: u32) -> Result<(), StorageError> {
    conn.pragma_update(None, "user_version", version.to_string())?;
    Ok(())
}
