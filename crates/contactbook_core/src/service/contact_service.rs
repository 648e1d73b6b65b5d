//! Contact use-case service for the signed-in user.
//!
//! # Responsibility
//! - Resolve the owning user from the session.
//! - Validate contact input before dispatching store mutations.
//!
//! # Invariants
//! - Every mutation targets the signed-in user's partition only.

use crate::model::contact::{Contact, ContactId};
use crate::model::user::UserId;
use crate::storage::KeyValueStore;
use crate::store::AppStore;
use crate::validation::{validate_contact, ContactInput, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected contact request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactServiceError {
    /// No session, or the session points at an unknown user.
    NotSignedIn,
    Validation(ValidationError),
    ContactNotFound(ContactId),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSignedIn => f.write_str("Please sign in first"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ContactServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type ContactServiceResult<T> = Result<T, ContactServiceError>;

/// Contact CRUD facade scoped to the current session.
pub struct ContactService<'store, S: KeyValueStore> {
    store: &'store mut AppStore<S>,
}

impl<'store, S: KeyValueStore> ContactService<'store, S> {
    pub fn new(store: &'store mut AppStore<S>) -> Self {
        Self { store }
    }

    /// Lists the signed-in user's contacts in insertion order.
    pub fn list(&self) -> ContactServiceResult<&[Contact]> {
        let user_id = self.current_user_id()?;
        Ok(self.store.contacts_for(user_id))
    }

    pub fn add(&mut self, input: &ContactInput<'_>) -> ContactServiceResult<ContactId> {
        let user_id = self.current_user_id()?;
        let valid = validate_contact(input)?;
        Ok(self.store.add_contact(user_id, &valid.name, &valid.phone))
    }

    pub fn update(&mut self, id: ContactId, input: &ContactInput<'_>) -> ContactServiceResult<()> {
        let user_id = self.current_user_id()?;
        let valid = validate_contact(input)?;
        if self
            .store
            .update_contact(user_id, id, &valid.name, &valid.phone)
        {
            Ok(())
        } else {
            Err(ContactServiceError::ContactNotFound(id))
        }
    }

    pub fn delete(&mut self, id: ContactId) -> ContactServiceResult<()> {
        let user_id = self.current_user_id()?;
        if self.store.delete_contact(user_id, id) {
            Ok(())
        } else {
            Err(ContactServiceError::ContactNotFound(id))
        }
    }

    fn current_user_id(&self) -> ContactServiceResult<UserId> {
        self.store
            .current_user()
            .map(|user| user.id)
            .ok_or(ContactServiceError::NotSignedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactService, ContactServiceError};
    use crate::config::StoreConfig;
    use crate::storage::MemoryKeyValueStore;
    use crate::store::AppStore;
    use crate::validation::{ContactInput, Field};
    use uuid::Uuid;

    fn signed_in_store() -> AppStore<MemoryKeyValueStore> {
        let mut store = AppStore::open(MemoryKeyValueStore::new(), StoreConfig::default());
        store.register("Ada", "ada@x.io", "secret1").unwrap();
        store
    }

    fn input<'a>(name: &'a str, phone: &'a str) -> ContactInput<'a> {
        ContactInput { name, phone }
    }

    #[test]
    fn signed_out_requests_are_rejected() {
        let mut store = signed_in_store();
        store.logout();
        let mut service = ContactService::new(&mut store);

        assert_eq!(service.list(), Err(ContactServiceError::NotSignedIn));
        assert_eq!(
            service.add(&input("Bob", "1234567")),
            Err(ContactServiceError::NotSignedIn)
        );
        assert_eq!(
            service.delete(Uuid::new_v4()),
            Err(ContactServiceError::NotSignedIn)
        );
    }

    #[test]
    fn add_validates_and_stores_trimmed_fields() {
        let mut store = signed_in_store();
        let mut service = ContactService::new(&mut store);

        let err = service.add(&input("Bob", "12")).unwrap_err();
        assert!(matches!(err, ContactServiceError::Validation(ref inner) if inner.field == Field::Phone));

        let id = service.add(&input(" Bob ", " +1234567 ")).unwrap();
        let contacts = service.list().unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].id, id);
        assert_eq!(contacts[0].name, "Bob");
        assert_eq!(contacts[0].phone, "+1234567");
    }

    #[test]
    fn non_ascii_digit_phones_are_never_stored() {
        let mut store = signed_in_store();
        let mut service = ContactService::new(&mut store);

        for phone in ["١٢٣٤٥٦٧", "１２３４５６７"] {
            let err = service.add(&input("Bob", phone)).unwrap_err();
            assert!(matches!(err, ContactServiceError::Validation(ref inner) if inner.field == Field::Phone));
        }
        assert!(service.list().unwrap().is_empty());
        assert_eq!(store.contacts().total_count(), 0);
    }

    #[test]
    fn update_and_delete_report_unknown_ids() {
        let mut store = signed_in_store();
        let mut service = ContactService::new(&mut store);
        let missing = Uuid::new_v4();

        assert_eq!(
            service.update(missing, &input("Bob", "1234567")),
            Err(ContactServiceError::ContactNotFound(missing))
        );
        assert_eq!(
            service.delete(missing),
            Err(ContactServiceError::ContactNotFound(missing))
        );

        let id = service.add(&input("Bob", "1234567")).unwrap();
        service.update(id, &input("Robert", "7654321")).unwrap();
        assert_eq!(service.list().unwrap()[0].name, "Robert");
        service.delete(id).unwrap();
        assert!(service.list().unwrap().is_empty());
    }
}
