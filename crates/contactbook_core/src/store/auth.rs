//! Auth state and its reducers.
//!
//! # Responsibility
//! - Hold registered users and the live session.
//! - Apply register/login/logout mutations.
//!
//! # Invariants
//! - No two users share a normalized email (enforced by `register`).
//! - A mutation that cannot apply leaves state untouched and reports `false`
//!   / `None`; it never errors.
//! - Serialized shape is `{users, currentUserId, remember}`.

use crate::model::user::{normalize_email, Session, User, UserId};
use serde::{Deserialize, Serialize};

/// Registered users plus the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthState {
    pub users: Vec<User>,
    pub current_user_id: Option<UserId>,
    pub remember: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        let session = Session::default();
        Self {
            users: Vec::new(),
            current_user_id: session.current_user_id,
            remember: session.remember,
        }
    }
}

impl AuthState {
    pub fn session(&self) -> Session {
        Session {
            current_user_id: self.current_user_id,
            remember: self.remember,
        }
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Returns the signed-in user, if the session points at a known user.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user_id.and_then(|id| self.user(id))
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        let normalized = normalize_email(email);
        self.users.iter().find(|user| user.email == normalized)
    }

    pub fn find_by_credentials(&self, email: &str, password: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.matches_credentials(email, password))
    }

    /// Appends a new user and signs them in with `remember = true`.
    ///
    /// Returns `None` without touching state when the normalized email is
    /// already registered.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        now: i64,
    ) -> Option<UserId> {
        if self.find_by_email(email).is_some() {
            return None;
        }

        let user = User::new(name, email, password, now);
        let id = user.id;
        self.users.push(user);
        self.current_user_id = Some(id);
        self.remember = true;
        Some(id)
    }

    /// Signs in the user matching `email`/`password`.
    ///
    /// Returns the signed-in user ID, or `None` (state untouched) on mismatch.
    pub fn login(&mut self, email: &str, password: &str, remember: bool) -> Option<UserId> {
        let id = self.find_by_credentials(email, password)?.id;
        self.current_user_id = Some(id);
        self.remember = remember;
        Some(id)
    }

    /// Clears the current user; `remember` is kept.
    ///
    /// Returns whether a user was signed in.
    pub fn logout(&mut self) -> bool {
        self.current_user_id.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::AuthState;

    #[test]
    fn register_signs_in_new_user() {
        let mut state = AuthState::default();
        let id = state
            .register(" Ada ", "Ada@X.io", "secret1", 42)
            .expect("first registration should apply");

        let session = state.session();
        assert_eq!(session.current_user_id, Some(id));
        assert!(session.remember);
        let user = state.current_user().expect("current user");
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@x.io");
        assert_eq!(user.created_at, 42);
    }

    #[test]
    fn duplicate_normalized_email_is_dropped() {
        let mut state = AuthState::default();
        let first = state.register("A", "x@Y.com", "secret1", 1).unwrap();
        state.logout();

        assert_eq!(state.register("B", "x@y.com ", "secret2", 2), None);
        assert_eq!(state.users.len(), 1);
        assert_eq!(state.users[0].name, "A");
        assert_eq!(state.users[0].id, first);
        assert_eq!(state.current_user_id, None);
    }

    #[test]
    fn login_requires_exact_password_and_keeps_state_on_mismatch() {
        let mut state = AuthState::default();
        let id = state.register("Ada", "x@y.com", "secret1", 1).unwrap();
        state.logout();

        assert_eq!(state.login("x@y.com", "SECRET1", false), None);
        assert_eq!(state.current_user_id, None);
        assert!(state.remember);

        assert_eq!(state.login(" X@Y.COM ", "secret1", false), Some(id));
        assert_eq!(state.current_user_id, Some(id));
        assert!(!state.remember);
    }

    #[test]
    fn logout_keeps_remember_flag() {
        let mut state = AuthState::default();
        state.register("Ada", "x@y.com", "secret1", 1).unwrap();
        state.login("x@y.com", "secret1", false).unwrap();

        assert!(state.logout());
        assert!(!state.logout());
        assert_eq!(state.current_user_id, None);
        assert!(!state.remember);
    }

    #[test]
    fn deserializes_persisted_shape_with_missing_fields() {
        let state: AuthState = serde_json::from_str(r#"{"users":[]}"#).unwrap();
        assert_eq!(state, AuthState::default());

        let state: AuthState =
            serde_json::from_str(r#"{"users":[],"currentUserId":null,"remember":false,"extra":1}"#)
                .unwrap();
        assert!(!state.remember);
    }
}
