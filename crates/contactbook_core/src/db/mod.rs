//! SQLite file layer behind `storage::SqliteKeyValueStore`.
//!
//! Failures surface as `StorageError`; a file stamped by a newer build is
//! refused with `StorageError::UnsupportedSchemaVersion` before any entry is
//! touched.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
