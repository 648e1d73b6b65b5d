//! Best-effort persistence of named JSON blobs.
//!
//! # Responsibility
//! - Define the key/value backend contract used by the store orchestrator.
//! - Provide `load`/`save` helpers that never surface storage failures.
//!
//! # Invariants
//! - `load` returns the caller's fallback on absent, unreadable or corrupt
//!   entries; it never panics.
//! - `save` reports failures to the log sink and drops them.
//! - Stored values are never logged, only keys and sizes.

use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure while opening a backend or reading/writing an entry.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// The storage file carries a schema version this build does not know.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// Backend-specific failure without a richer error type.
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "storage file schema v{found} was written by a newer build (this build reads up to v{supported})"
            ),
            Self::Backend(message) => write!(f, "storage backend error: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Durable string storage addressed by key.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

/// Reads and deserializes the entry under `key`, or returns `fallback`.
pub fn load<T, S>(store: &S, key: &str, fallback: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=storage_load module=storage status=skipped key={key} reason=absent");
            return fallback;
        }
        Err(err) => {
            warn!("event=storage_load module=storage status=error key={key} error={err}");
            return fallback;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => {
            debug!(
                "event=storage_load module=storage status=ok key={key} bytes={}",
                raw.len()
            );
            value
        }
        Err(err) => {
            warn!(
                "event=storage_load module=storage status=error key={key} error_code=corrupt_entry error={err}"
            );
            fallback
        }
    }
}

/// Serializes `value` and writes it under `key`.
///
/// Failures are logged at `error` level and otherwise ignored.
pub fn save<T, S>(store: &mut S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            error!(
                "event=storage_save module=storage status=error key={key} error_code=serialize_failed error={err}"
            );
            return;
        }
    };

    match store.set_item(key, &raw) {
        Ok(()) => debug!(
            "event=storage_save module=storage status=ok key={key} bytes={}",
            raw.len()
        ),
        Err(err) => error!(
            "event=storage_save module=storage status=error key={key} error_code=write_failed error={err}"
        ),
    }
}
