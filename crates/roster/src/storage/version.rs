//! Schema version stamp for the key-value file.
//!
//! Only the `SQLite` table layout is versioned. The JSON stored inside a
//! slot carries no version of its own.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// Table layout version written by this build.
pub const CURRENT_VERSION: i32 = 1;

const VERSION_KEY: &str = "schema_version";

/// Create the tables if needed and check the stored version.
///
/// A fresh file is stamped with [`CURRENT_VERSION`]. A file written by a
/// newer layout is refused rather than read with the wrong table shapes.
///
/// # Errors
///
/// Returns [`Error::SchemaVersion`] if the stored version is unreadable or
/// newer than [`CURRENT_VERSION`], or a query error if table creation fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    match stored_version(conn)? {
        None => {
            conn.execute(
                "INSERT INTO metadata (key, value) VALUES (?1, ?2)",
                (VERSION_KEY, CURRENT_VERSION.to_string()),
            )?;
            Ok(())
        }
        Some(version) if version > CURRENT_VERSION => Err(Error::SchemaVersion {
            message: format!(
                "file has version {version}, this build supports up to {CURRENT_VERSION}"
            ),
        }),
        Some(_) => Ok(()),
    }
}

fn stored_version(conn: &Connection) -> Result<Option<i32>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    value
        .map(|v| {
            v.parse().map_err(|_| Error::SchemaVersion {
                message: format!("invalid version stamp: {v}"),
            })
        })
        .transpose()
}
