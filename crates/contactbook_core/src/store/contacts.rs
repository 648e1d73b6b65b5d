//! Contacts state partitioned by owning user.
//!
//! # Invariants
//! - Each user's contacts keep insertion order across update/delete.
//! - An absent user key and an empty list both read as zero contacts.
//! - Reducers take the owning user ID explicitly; no session lookup here.
//! - Serialized shape is `{byUserId: {<userId>: [Contact]}}`.

use crate::model::contact::{Contact, ContactId};
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactsState {
    pub by_user_id: BTreeMap<UserId, Vec<Contact>>,
}

impl ContactsState {
    /// Returns the user's contacts in insertion order.
    pub fn contacts_for(&self, user_id: UserId) -> &[Contact] {
        self.by_user_id
            .get(&user_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn find(&self, user_id: UserId, id: ContactId) -> Option<&Contact> {
        self.contacts_for(user_id)
            .iter()
            .find(|contact| contact.id == id)
    }

    /// Appends a new contact for `user_id` and returns its ID.
    pub fn add(&mut self, user_id: UserId, name: &str, phone: &str, now: i64) -> ContactId {
        let contact = Contact::new(name, phone, now);
        let id = contact.id;
        self.by_user_id.entry(user_id).or_default().push(contact);
        id
    }

    /// Edits the matching contact in place.
    ///
    /// Returns `false` when the user or contact does not exist.
    pub fn update(
        &mut self,
        user_id: UserId,
        id: ContactId,
        name: &str,
        phone: &str,
        now: i64,
    ) -> bool {
        let Some(contact) = self
            .by_user_id
            .get_mut(&user_id)
            .and_then(|contacts| contacts.iter_mut().find(|contact| contact.id == id))
        else {
            return false;
        };
        contact.apply_edit(name, phone, now);
        true
    }

    /// Removes the matching contact, keeping the order of the rest.
    ///
    /// Returns `false` when the user or contact does not exist.
    pub fn delete(&mut self, user_id: UserId, id: ContactId) -> bool {
        let Some(contacts) = self.by_user_id.get_mut(&user_id) else {
            return false;
        };
        let before = contacts.len();
        contacts.retain(|contact| contact.id != id);
        contacts.len() != before
    }

    /// Total contacts across all users.
    pub fn total_count(&self) -> usize {
        self.by_user_id.values().map(Vec::len).sum()
    }
}
