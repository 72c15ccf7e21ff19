//! Error types for roster.
//!
//! This module defines the error types used throughout the roster crate.
//! Form validation failures live in [`crate::form::ValidationError`] because
//! they are shown to the user rather than propagated.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for roster operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// The database file's table layout is not one this build can use.
    #[error("unsupported database schema: {message}")]
    SchemaVersion {
        /// Description of what went wrong.
        message: String,
    },

    /// The value stored under a slot could not be decoded.
    #[error("failed to read storage slot '{key}': {source}")]
    StorageRead {
        /// The slot key.
        key: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Record Errors ===
    /// A course label did not match any known course.
    #[error("unknown course '{0}'")]
    UnknownCourse(String),

    /// A row number outside the displayed list was requested.
    #[error("no student at row {row} (list has {len} entries)")]
    RowOutOfRange {
        /// The requested 1-based row.
        row: usize,
        /// Number of rows available.
        len: usize,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// A blocking storage task failed to complete.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for roster operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a storage read error for the given slot.
    #[must_use]
    pub fn storage_read(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::StorageRead {
            key: key.into(),
            source,
        }
    }

    /// Check if this error came from decoding stored data.
    #[must_use]
    pub fn is_storage_read(&self) -> bool {
        matches!(self, Self::StorageRead { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<i32>("not valid json").unwrap_err()
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_storage_read_error_display() {
        let err = Error::storage_read("studentData", json_error());
        let msg = err.to_string();
        assert!(msg.contains("studentData"));
        assert!(err.is_storage_read());
    }

    #[test]
    fn test_is_storage_read_false_for_other_errors() {
        assert!(!Error::internal("x").is_storage_read());
        assert!(!Error::Json(json_error()).is_storage_read());
    }

    #[test]
    fn test_unknown_course_display() {
        let err = Error::UnknownCourse("BSXYZ".to_string());
        assert_eq!(err.to_string(), "unknown course 'BSXYZ'");
    }

    #[test]
    fn test_row_out_of_range_display() {
        let err = Error::RowOutOfRange { row: 5, len: 2 };
        let msg = err.to_string();
        assert!(msg.contains("row 5"));
        assert!(msg.contains("2 entries"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let err: Error = json_error().into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_schema_version_error_display() {
        let err = Error::SchemaVersion {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "slot_key must not be empty".to_string(),
        };
        assert!(err.to_string().contains("slot_key"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
