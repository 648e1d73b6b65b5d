//! Core state and persistence logic for Contactbook.
//! This crate is the single source of truth for account and contact invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;
pub mod validation;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{Contact, ContactId};
pub use model::user::{normalize_email, Session, User, UserId};
pub use service::account_service::{AccountError, AccountService};
pub use service::contact_service::{ContactService, ContactServiceError};
pub use storage::{
    load, save, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError,
    StorageResult,
};
pub use store::auth::AuthState;
pub use store::contacts::ContactsState;
pub use store::AppStore;
pub use validation::{
    validate_contact, validate_user, ContactInput, Field, UserInput, ValidContact, ValidUser,
    ValidationError,
};
pub use view::contact_list::{ContactListView, ContactPage};
pub use view::pagination::{Page, Paginator};
pub use view::sorting::{compare_names, sort_by_name, SortDirection};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
