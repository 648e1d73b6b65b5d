//! User and session domain model.
//!
//! # Responsibility
//! - Define the registered-user record and the single live session.
//! - Own the email normalization rule shared by validation and stores.
//!
//! # Invariants
//! - `User.email` is always stored normalized (trimmed + lowercased).
//! - Users are created by registration only and never mutated afterwards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a registered user.
///
/// Also used as the partition key for contact lists.
pub type UserId = Uuid;

/// Registered account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Display name, trimmed at registration.
    pub name: String,
    /// Normalized email, unique across all users.
    pub email: String,
    /// Stored verbatim; this crate provides no credential security.
    pub password: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl User {
    /// Creates a user with a generated stable ID.
    ///
    /// `name` is trimmed and `email` normalized; `password` is kept verbatim.
    pub fn new(
        name: &str,
        email: &str,
        password: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: normalize_email(email),
            password: password.into(),
            created_at,
        }
    }

    /// Returns whether `email`/`password` identify this user.
    ///
    /// Email comparison is on the normalized form; password comparison is
    /// exact and case-sensitive.
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == normalize_email(email) && self.password == password
    }
}

/// Currently authenticated user plus the "remember me" preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub current_user_id: Option<UserId>,
    pub remember: bool,
}

impl Session {
    /// Returns whether a user is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.current_user_id.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            current_user_id: None,
            remember: true,
        }
    }
}

/// Normalizes an email for storage and comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
