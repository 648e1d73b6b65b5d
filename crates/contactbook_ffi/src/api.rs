//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose session, account and contact-list use cases to Dart via FRB.
//! - Own the process-wide store and the contact list view state.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - The storage path is fixed on first store access and cannot change later.
//! - Every response carries a human-readable `message`.

use contactbook_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, AccountService,
    AppStore, Contact, ContactInput, ContactListView, ContactPage, ContactService,
    SqliteKeyValueStore, StoreConfig, UserInput,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

const STORAGE_FILE_NAME: &str = "contactbook.sqlite3";
const STORAGE_PATH_ENV: &str = "CONTACTBOOK_DB_PATH";

static STORAGE_PATH: OnceLock<PathBuf> = OnceLock::new();
static APP: Mutex<Option<AppState>> = Mutex::new(None);

struct AppState {
    store: AppStore<SqliteKeyValueStore>,
    view: ContactListView,
}

impl AppState {
    // Each session starts on page 1, ascending.
    fn reset_view(&mut self) {
        self.view = ContactListView::new(self.store.config().page_size);
    }
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Pins the storage file location before the store is first opened.
///
/// # FFI contract
/// - Returns empty string on success (including repeating the same path).
/// - Returns an error message when a different path is already in use.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_storage_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "storage path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = STORAGE_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "storage already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation was applied.
    pub ok: bool,
    /// ID of the created or affected user/contact.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Current session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub signed_in: bool,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub remember: bool,
    pub message: String,
}

/// One contact row for list display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    pub id: String,
    pub name: String,
    pub phone: String,
    /// 1-based position in the sorted list.
    pub row_number: u32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Sorted and paged contact list of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactsPageResponse {
    pub items: Vec<ContactItem>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u32,
    pub page_size: u32,
    pub can_go_next: bool,
    pub can_go_prev: bool,
    pub ascending: bool,
    pub message: String,
}

impl ContactsPageResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            page_size: 0,
            can_go_next: false,
            can_go_prev: false,
            ascending: true,
            message: message.into(),
        }
    }
}

/// Registers a user and signs them in.
///
/// # FFI contract
/// - Validation, duplicate-email and storage failures return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_register(name: String, email: String, password: String) -> ActionResponse {
    let input = UserInput {
        name: &name,
        email: &email,
        password: &password,
    };
    let registered = with_app(|app| {
        let result = AccountService::new(&mut app.store).register(&input);
        if result.is_ok() {
            app.reset_view();
        }
        result
    });
    match registered {
        Ok(Ok(user_id)) => ActionResponse::success("Account created.", Some(user_id.to_string())),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(err) => ActionResponse::failure(err),
    }
}

/// Signs in with email and password.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_login(email: String, password: String, remember: bool) -> ActionResponse {
    let signed_in = with_app(|app| {
        let result = AccountService::new(&mut app.store).login(&email, &password, remember);
        if result.is_ok() {
            app.reset_view();
        }
        result
    });
    match signed_in {
        Ok(Ok(user_id)) => ActionResponse::success("Signed in.", Some(user_id.to_string())),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(err) => ActionResponse::failure(err),
    }
}

/// Signs out; succeeds even when nobody was signed in.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_logout() -> ActionResponse {
    let signed_out = with_app(|app| {
        app.reset_view();
        AccountService::new(&mut app.store).logout()
    });
    match signed_out {
        Ok(true) => ActionResponse::success("Signed out.", None),
        Ok(false) => ActionResponse::success("Already signed out.", None),
        Err(err) => ActionResponse::failure(err),
    }
}

/// Returns the current session.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_session() -> SessionResponse {
    let snapshot = with_app(|app| {
        let session = app.store.session();
        let user = app.store.current_user();
        SessionResponse {
            signed_in: user.is_some(),
            user_id: user.map(|user| user.id.to_string()),
            user_name: user.map(|user| user.name.clone()),
            remember: session.remember,
            message: String::new(),
        }
    });
    snapshot.unwrap_or_else(|err| SessionResponse {
        signed_in: false,
        user_id: None,
        user_name: None,
        remember: true,
        message: err,
    })
}

/// Adds a contact for the signed-in user.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_add(name: String, phone: String) -> ActionResponse {
    let input = ContactInput {
        name: &name,
        phone: &phone,
    };
    match with_app(|app| ContactService::new(&mut app.store).add(&input)) {
        Ok(Ok(id)) => ActionResponse::success("Contact added.", Some(id.to_string())),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(err) => ActionResponse::failure(err),
    }
}

/// Edits a contact of the signed-in user.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_update(id: String, name: String, phone: String) -> ActionResponse {
    let Some(contact_id) = parse_contact_id(&id) else {
        return ActionResponse::failure(format!("invalid contact id `{id}`"));
    };
    let input = ContactInput {
        name: &name,
        phone: &phone,
    };
    match with_app(|app| ContactService::new(&mut app.store).update(contact_id, &input)) {
        Ok(Ok(())) => ActionResponse::success("Contact updated.", Some(id)),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(err) => ActionResponse::failure(err),
    }
}

/// Deletes a contact of the signed-in user.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_delete(id: String) -> ActionResponse {
    let Some(contact_id) = parse_contact_id(&id) else {
        return ActionResponse::failure(format!("invalid contact id `{id}`"));
    };
    match with_app(|app| ContactService::new(&mut app.store).delete(contact_id)) {
        Ok(Ok(())) => ActionResponse::success("Contact deleted.", Some(id)),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(err) => ActionResponse::failure(err),
    }
}

/// Recomputes the current page of the signed-in user's contacts.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_page() -> ContactsPageResponse {
    page_response(|_| {})
}

/// Moves to `page` (clamped into the valid range) and returns it.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_go_to_page(page: i64) -> ContactsPageResponse {
    let requested = usize::try_from(page).unwrap_or(0);
    page_response(|app| {
        let count = app.store.current_contacts().len();
        app.view.go_to_page(requested, count);
    })
}

/// Moves one page forward (no-op on the last page) and returns it.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_next_page() -> ContactsPageResponse {
    page_response(|app| {
        let count = app.store.current_contacts().len();
        app.view.next_page(count);
    })
}

/// Moves one page back (no-op on page 1) and returns it.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_prev_page() -> ContactsPageResponse {
    page_response(|app| {
        let count = app.store.current_contacts().len();
        app.view.prev_page(count);
    })
}

/// Flips the name sort direction and returns the recomputed page.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_toggle_sort() -> ContactsPageResponse {
    page_response(|app| {
        app.view.toggle_sort();
    })
}

fn page_response(adjust: impl FnOnce(&mut AppState)) -> ContactsPageResponse {
    let computed = with_app(|app| {
        if app.store.current_user().is_none() {
            return None;
        }
        adjust(app);
        let page = app.view.compute(app.store.current_contacts());
        Some((page, app.view.direction().is_ascending()))
    });

    match computed {
        Ok(Some((page, ascending))) => to_page_response(page, ascending),
        Ok(None) => ContactsPageResponse::failure("Please sign in first"),
        Err(err) => ContactsPageResponse::failure(err),
    }
}

fn to_page_response(page: ContactPage, ascending: bool) -> ContactsPageResponse {
    let first_row = page.first_row_number();
    let message = if page.total_items == 0 {
        "No contacts yet.".to_string()
    } else {
        format!("Page {} of {}.", page.current_page, page.total_pages)
    };
    ContactsPageResponse {
        items: page
            .items
            .into_iter()
            .enumerate()
            .map(|(offset, contact)| to_contact_item(contact, first_row + offset))
            .collect(),
        current_page: to_u32(page.current_page),
        total_pages: to_u32(page.total_pages),
        total_items: to_u32(page.total_items),
        page_size: to_u32(page.page_size),
        can_go_next: page.can_go_next,
        can_go_prev: page.can_go_prev,
        ascending,
        message,
    }
}

fn to_contact_item(contact: Contact, row_number: usize) -> ContactItem {
    ContactItem {
        id: contact.id.to_string(),
        name: contact.name,
        phone: contact.phone,
        row_number: to_u32(row_number),
        created_at: contact.created_at,
        updated_at: contact.updated_at,
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn parse_contact_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

fn resolve_storage_path() -> PathBuf {
    STORAGE_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(STORAGE_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORAGE_FILE_NAME)
        })
        .clone()
}

fn with_app<T>(f: impl FnOnce(&mut AppState) -> T) -> Result<T, String> {
    let mut guard = APP.lock().map_err(|_| {
        warn!("event=ffi_state module=ffi status=error error_code=lock_poisoned");
        "contact store is unavailable after an earlier failure".to_string()
    })?;

    if guard.is_none() {
        let path = resolve_storage_path();
        let storage = SqliteKeyValueStore::open(&path)
            .map_err(|err| format!("storage open failed: {err}"))?;
        let config = StoreConfig::from_env();
        let view = ContactListView::new(config.page_size);
        *guard = Some(AppState {
            store: AppStore::open(storage, config),
            view,
        });
    }

    match guard.as_mut() {
        Some(app) => Ok(f(app)),
        None => Err("contact store is not initialized".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        auth_login, auth_logout, auth_register, auth_session, configure_storage_path,
        contacts_add, contacts_delete, contacts_go_to_page, contacts_next_page, contacts_page,
        contacts_prev_page, contacts_toggle_sort, contacts_update, core_version, init_logging,
    };
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use std::time::{SystemTime, UNIX_EPOCH};
    use tempfile::TempDir;

    static STORAGE_DIR: OnceLock<TempDir> = OnceLock::new();
    static SERIAL: Mutex<()> = Mutex::new(());

    // The store and session are process-wide; run stateful tests one at a time.
    fn serial_with_storage() -> MutexGuard<'static, ()> {
        let guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let dir = STORAGE_DIR.get_or_init(|| tempfile::tempdir().expect("temp dir"));
        let path = dir.path().join("ffi-tests.sqlite3");
        let message = configure_storage_path(path.to_string_lossy().into_owned());
        assert!(message.is_empty(), "{message}");
        guard
    }

    fn unique_email(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}@example.com")
    }

    fn register_fresh(prefix: &str) -> String {
        let response = auth_register(
            "Tester".to_string(),
            unique_email(prefix),
            "secret1".to_string(),
        );
        assert!(response.ok, "{}", response.message);
        response.id.expect("register should return user id")
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_arguments() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn configure_storage_path_rejects_switching() {
        let _guard = serial_with_storage();
        assert!(!configure_storage_path(String::new()).is_empty());
        let message = configure_storage_path("/somewhere/else.sqlite3".to_string());
        assert!(message.contains("refusing to switch"));
    }

    #[test]
    fn register_login_logout_roundtrip() {
        let _guard = serial_with_storage();
        let email = unique_email("roundtrip");
        let registered = auth_register("Ada".to_string(), email.clone(), "secret1".to_string());
        assert!(registered.ok, "{}", registered.message);

        let duplicate = auth_register("Bob".to_string(), email.to_uppercase(), "secret2".to_string());
        assert!(!duplicate.ok);
        assert_eq!(duplicate.message, "Email already registered");

        assert!(auth_logout().ok);
        assert!(!auth_session().signed_in);

        let mismatch = auth_login(email.clone(), "wrong-pass".to_string(), true);
        assert!(!mismatch.ok);
        assert_eq!(mismatch.message, "Invalid email or password");

        let login = auth_login(email, "secret1".to_string(), false);
        assert!(login.ok, "{}", login.message);
        let session = auth_session();
        assert!(session.signed_in);
        assert_eq!(session.user_id, registered.id);
        assert_eq!(session.user_name.as_deref(), Some("Ada"));
        assert!(!session.remember);
    }

    #[test]
    fn contacts_page_reports_signed_out() {
        let _guard = serial_with_storage();
        auth_logout();
        let page = contacts_page();
        assert!(page.items.is_empty());
        assert_eq!(page.message, "Please sign in first");
        assert!(!contacts_add("Bob".to_string(), "1234567".to_string()).ok);
    }

    #[test]
    fn contacts_crud_sort_and_paging() {
        let _guard = serial_with_storage();
        register_fresh("contacts");

        let rejected = contacts_add("Bob".to_string(), "12".to_string());
        assert!(!rejected.ok);
        assert_eq!(rejected.message, "Enter a valid phone number (7-15 digits)");

        let mut ids = Vec::new();
        for index in 0..7 {
            let added = contacts_add(format!("Person {index}"), "1234567".to_string());
            assert!(added.ok, "{}", added.message);
            ids.push(added.id.expect("contact id"));
        }

        let page = contacts_page();
        assert_eq!(page.total_items, 7);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items[0].name, "Person 0");
        assert_eq!(page.items[0].row_number, 1);

        let page = contacts_go_to_page(99);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items[0].row_number, 6);
        let page = contacts_go_to_page(-3);
        assert_eq!(page.current_page, 1);

        let page = contacts_prev_page();
        assert_eq!(page.current_page, 1);
        assert!(!page.can_go_prev);
        let page = contacts_next_page();
        assert_eq!(page.current_page, 2);
        assert!(!page.can_go_next);
        let page = contacts_next_page();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 2);
        let page = contacts_prev_page();
        assert_eq!(page.current_page, 1);

        let page = contacts_toggle_sort();
        assert!(!page.ascending);
        assert_eq!(page.items[0].name, "Person 6");
        let page = contacts_toggle_sort();
        assert!(page.ascending);

        let updated = contacts_update(ids[0].clone(), "Zed".to_string(), "7654321".to_string());
        assert!(updated.ok, "{}", updated.message);
        assert!(!contacts_update("nope".to_string(), "Zed".to_string(), "7654321".to_string()).ok);

        for id in &ids[1..] {
            assert!(contacts_delete(id.clone()).ok);
        }
        let page = contacts_page();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].name, "Zed");
        assert_eq!(page.items[0].phone, "7654321");
        assert!(!contacts_delete(ids[1].clone()).ok);
    }
}
