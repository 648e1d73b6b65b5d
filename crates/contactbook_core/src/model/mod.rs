//! Domain model for accounts and contacts.
//!
//! # Responsibility
//! - Define canonical records shared by stores, services and persistence.
//! - Keep serialized field names stable for persisted JSON blobs.
//!
//! # Invariants
//! - Every record is identified by a stable UUID that is never reused.
//! - Contacts do not embed their owner; ownership is the partition key of
//!   `ContactsState`.

pub mod contact;
pub mod user;
