//! The student record store.
//!
//! All records live as one JSON array under a single storage slot. Reads
//! decode the whole array; appends rewrite it.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::record::StudentRecord;
use crate::storage::KeyValueStore;

/// Slot name used when none is configured.
pub const DEFAULT_SLOT_KEY: &str = "studentData";

/// Ordered records; insertion order is display order.
pub type RecordSequence = Vec<StudentRecord>;

/// Reads and appends student records in one key-value slot.
///
/// The append is a plain read-modify-write with no locking. There is a
/// single writer per slot.
#[derive(Debug, Clone)]
pub struct RecordStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Create a store over `backend` using the default slot.
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_SLOT_KEY)
    }

    /// Create a store over `backend` using a custom slot name.
    #[must_use]
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The slot this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying key-value backend.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read every stored record.
    ///
    /// Never fails: an absent or empty slot is an empty sequence, and
    /// unreadable or malformed content is logged and also treated as empty.
    pub async fn read_all(&self) -> RecordSequence {
        match self.try_read_all().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Error getting student data: {}", e);
                Vec::new()
            }
        }
    }

    /// Read every stored record, reporting malformed content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageRead`] if the slot holds something other than
    /// a JSON array of records, or a storage error if the backend fails.
    pub async fn try_read_all(&self) -> Result<RecordSequence> {
        let raw = match self.backend.get_item(&self.key).await? {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                debug!("Slot '{}' is empty", self.key);
                return Ok(Vec::new());
            }
        };

        serde_json::from_str(&raw).map_err(|source| Error::storage_read(&self.key, source))
    }

    /// Append `record` and persist the whole sequence.
    ///
    /// Returns the sequence as written. If the existing slot content cannot
    /// be decoded, nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the current content is malformed or the backend
    /// fails to read or write.
    pub async fn append(&self, record: StudentRecord) -> Result<RecordSequence> {
        let mut records = self.try_read_all().await?;
        records.push(record);

        let encoded = serde_json::to_string(&records)?;
        self.backend.set_item(&self.key, &encoded).await?;

        debug!("Slot '{}' now holds {} records", self.key, records.len());
        Ok(records)
    }

    /// Remove the slot and with it every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub async fn clear(&self) -> Result<()> {
        self.backend.remove_item(&self.key).await
    }
}
