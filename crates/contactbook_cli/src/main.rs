//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `contactbook_core` linkage and open a storage file outside any UI.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `contactbook_cli [storage-file]` (defaults to `CONTACTBOOK_DB_PATH`,
//! then `contactbook.sqlite3` in the temp directory).

use contactbook_core::{core_version, AppStore, SqliteKeyValueStore, StoreConfig};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("CONTACTBOOK_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(|| std::env::temp_dir().join("contactbook.sqlite3"));

    println!("contactbook_core version={}", core_version());

    let storage = match SqliteKeyValueStore::open(&path) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("contactbook storage={} error={err}", path.display());
            return ExitCode::FAILURE;
        }
    };
    let store = AppStore::open(storage, StoreConfig::from_env());

    println!("contactbook storage={}", path.display());
    println!(
        "contactbook users={} contacts={} signed_in={}",
        store.users().len(),
        store.contacts().total_count(),
        store.session().is_signed_in()
    );
    ExitCode::SUCCESS
}
