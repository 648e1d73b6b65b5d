//! Account use-case service.
//!
//! # Responsibility
//! - Validate registration input and reject duplicate emails.
//! - Reject logins without a matching email/password pair.
//!
//! # Invariants
//! - Store mutations are dispatched only after every check passed.
//! - Error messages are safe to show to the user as-is.

use crate::model::user::UserId;
use crate::storage::KeyValueStore;
use crate::store::AppStore;
use crate::validation::{validate_user, UserInput, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected account request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    Validation(ValidationError),
    /// The normalized email already belongs to a user.
    DuplicateEmail,
    /// Email or password was left blank.
    MissingCredentials,
    /// No user matches the email/password pair.
    CredentialMismatch,
}

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateEmail => f.write_str("Email already registered"),
            Self::MissingCredentials => f.write_str("Please enter your email and password"),
            Self::CredentialMismatch => f.write_str("Invalid email or password"),
        }
    }
}

impl Error for AccountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for AccountError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Registration and sign-in facade over an `AppStore`.
pub struct AccountService<'store, S: KeyValueStore> {
    store: &'store mut AppStore<S>,
}

impl<'store, S: KeyValueStore> AccountService<'store, S> {
    pub fn new(store: &'store mut AppStore<S>) -> Self {
        Self { store }
    }

    /// Registers a new user and signs them in.
    ///
    /// # Errors
    /// - `Validation` for the first violated field rule.
    /// - `DuplicateEmail` when the normalized email is taken.
    pub fn register(&mut self, input: &UserInput<'_>) -> Result<UserId, AccountError> {
        let valid = validate_user(input)?;
        if self.store.auth().find_by_email(&valid.email).is_some() {
            return Err(AccountError::DuplicateEmail);
        }

        self.store
            .register(&valid.name, &valid.email, &valid.password)
            .ok_or(AccountError::DuplicateEmail)
    }

    /// Signs in the user matching `email`/`password`.
    ///
    /// # Errors
    /// - `MissingCredentials` when either field is empty.
    /// - `CredentialMismatch` when no user matches.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<UserId, AccountError> {
        if email.is_empty() || password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }
        if self
            .store
            .auth()
            .find_by_credentials(email, password)
            .is_none()
        {
            return Err(AccountError::CredentialMismatch);
        }

        self.store
            .login(email, password, remember)
            .ok_or(AccountError::CredentialMismatch)
    }

    /// Signs out. Returns whether a user was signed in.
    pub fn logout(&mut self) -> bool {
        self.store.logout()
    }
}
