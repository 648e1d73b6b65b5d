//! Contact domain model.
//!
//! # Invariants
//! - `created_at` never changes after creation.
//! - Timestamps come from the caller; this module never reads a clock.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a contact entry.
pub type ContactId = Uuid;

/// One phone-book entry owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every update.
    pub updated_at: i64,
}

impl Contact {
    /// Creates a contact with a generated ID and trimmed fields.
    pub fn new(name: &str, phone: &str, now: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces editable fields and refreshes `updated_at`.
    pub fn apply_edit(&mut self, name: &str, phone: &str, now: i64) {
        self.name = name.trim().to_string();
        self.phone = phone.trim().to_string();
        self.updated_at = now;
    }
}
