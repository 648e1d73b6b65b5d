//! Process state container composing auth and contacts state.
//!
//! # Responsibility
//! - Own `AuthState` and `ContactsState` for one composition root.
//! - Apply mutations and write every committed change through to storage.
//!
//! # Invariants
//! - State is loaded once at `open`; unreadable entries start from defaults.
//! - A mutation that changes state persists both entries before returning.
//! - A mutation that applies nothing performs no storage write.
//! - Log events carry IDs and counts only.

pub mod auth;
pub mod contacts;

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::model::contact::{Contact, ContactId};
use crate::model::user::{Session, User, UserId};
use crate::storage::{self, KeyValueStore};
use auth::AuthState;
use contacts::ContactsState;
use log::{debug, info};

/// Single in-memory store backed by a write-through key/value backend.
pub struct AppStore<S: KeyValueStore> {
    storage: S,
    config: StoreConfig,
    clock: Box<dyn Clock + Send>,
    auth: AuthState,
    contacts: ContactsState,
}

impl<S: KeyValueStore> AppStore<S> {
    /// Loads persisted state from `storage`, falling back to empty state.
    pub fn open(storage: S, config: StoreConfig) -> Self {
        let auth = storage::load(&storage, &config.auth_key, AuthState::default());
        let contacts = storage::load(&storage, &config.contacts_key, ContactsState::default());
        info!(
            "event=store_open module=store status=ok users={} contacts={} signed_in={}",
            auth.users.len(),
            contacts.total_count(),
            auth.current_user_id.is_some()
        );

        Self {
            storage,
            config,
            clock: Box::new(SystemClock),
            auth,
            contacts,
        }
    }

    /// Replaces the timestamp source.
    pub fn with_clock(mut self, clock: impl Clock + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn contacts(&self) -> &ContactsState {
        &self.contacts
    }

    pub fn session(&self) -> Session {
        self.auth.session()
    }

    pub fn users(&self) -> &[User] {
        &self.auth.users
    }

    pub fn current_user(&self) -> Option<&User> {
        self.auth.current_user()
    }

    pub fn contacts_for(&self, user_id: UserId) -> &[Contact] {
        self.contacts.contacts_for(user_id)
    }

    /// Contacts of the signed-in user; empty when signed out.
    pub fn current_contacts(&self) -> &[Contact] {
        match self.auth.current_user_id {
            Some(id) => self.contacts.contacts_for(id),
            None => &[],
        }
    }

    /// Registers and signs in a user. No-op on a duplicate normalized email.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Option<UserId> {
        let now = self.clock.now_ms();
        let created = self.auth.register(name, email, password, now);
        match created {
            Some(id) => {
                info!("event=auth_register module=store status=ok user_id={id}");
                self.persist();
            }
            None => info!("event=auth_register module=store status=skipped reason=duplicate_email"),
        }
        created
    }

    /// Signs in the matching user. No-op when no user matches.
    pub fn login(&mut self, email: &str, password: &str, remember: bool) -> Option<UserId> {
        let matched = self.auth.login(email, password, remember);
        match matched {
            Some(id) => {
                info!("event=auth_login module=store status=ok user_id={id} remember={remember}");
                self.persist();
            }
            None => info!("event=auth_login module=store status=skipped reason=credential_mismatch"),
        }
        matched
    }

    /// Clears the session user, keeping the remember flag.
    pub fn logout(&mut self) -> bool {
        let signed_out = self.auth.logout();
        if signed_out {
            info!("event=auth_logout module=store status=ok");
            self.persist();
        } else {
            debug!("event=auth_logout module=store status=skipped reason=signed_out");
        }
        signed_out
    }

    /// Appends a contact to `user_id`'s list.
    pub fn add_contact(&mut self, user_id: UserId, name: &str, phone: &str) -> ContactId {
        let now = self.clock.now_ms();
        let id = self.contacts.add(user_id, name, phone, now);
        info!("event=contact_add module=store status=ok user_id={user_id} contact_id={id}");
        self.persist();
        id
    }

    /// Edits a contact in place. No-op when the user or contact is unknown.
    pub fn update_contact(
        &mut self,
        user_id: UserId,
        id: ContactId,
        name: &str,
        phone: &str,
    ) -> bool {
        let now = self.clock.now_ms();
        let updated = self.contacts.update(user_id, id, name, phone, now);
        self.finish_contact_write("contact_update", user_id, id, updated);
        updated
    }

    /// Removes a contact. No-op when the user or contact is unknown.
    pub fn delete_contact(&mut self, user_id: UserId, id: ContactId) -> bool {
        let deleted = self.contacts.delete(user_id, id);
        self.finish_contact_write("contact_delete", user_id, id, deleted);
        deleted
    }

    fn finish_contact_write(
        &mut self,
        event: &'static str,
        user_id: UserId,
        id: ContactId,
        applied: bool,
    ) {
        if applied {
            info!("event={event} module=store status=ok user_id={user_id} contact_id={id}");
            self.persist();
        } else {
            info!(
                "event={event} module=store status=skipped user_id={user_id} contact_id={id} reason=not_found"
            );
        }
    }

    fn persist(&mut self) {
        storage::save(&mut self.storage, &self.config.auth_key, &self.auth);
        storage::save(&mut self.storage, &self.config.contacts_key, &self.contacts);
    }
}
