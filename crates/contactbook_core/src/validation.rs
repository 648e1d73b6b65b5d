//! Field validation for registration and contact forms.
//!
//! # Responsibility
//! - Check raw user input against field constraints.
//! - Return normalized values on success, the first violation otherwise.
//!
//! # Invariants
//! - Rules are evaluated in a fixed order and stop at the first failure.
//! - Validation never panics and never touches store state.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const USER_NAME_MIN_CHARS: usize = 3;
pub const USER_NAME_MAX_CHARS: usize = 100;
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const PASSWORD_MAX_CHARS: usize = 128;
pub const CONTACT_NAME_MAX_CHARS: usize = 100;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("valid email regex")
});
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid phone regex"));

/// Input field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    Phone,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Phone => "phone",
        }
    }
}

/// First violated field rule, with a message suitable for direct display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

impl Error for ValidationError {}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Raw registration form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Registration input that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUser {
    pub name: String,
    /// Trimmed and lowercased.
    pub email: String,
    pub password: String,
}

/// Raw contact form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactInput<'a> {
    pub name: &'a str,
    pub phone: &'a str,
}

/// Contact input that passed every rule, with both fields trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub phone: String,
}

/// Validates registration input.
///
/// Rule order: name length, email syntax, password length.
///
/// # Errors
/// Returns the first violated rule as `ValidationError`.
pub fn validate_user(input: &UserInput<'_>) -> ValidationResult<ValidUser> {
    let name_chars = input.name.trim().chars().count();
    if name_chars < USER_NAME_MIN_CHARS {
        return Err(ValidationError::new(
            Field::Name,
            "Name must be at least 3 characters",
        ));
    }
    if name_chars > USER_NAME_MAX_CHARS {
        return Err(ValidationError::new(Field::Name, "Name is too long"));
    }

    let email = crate::model::user::normalize_email(input.email);
    if !is_valid_email(&email) {
        return Err(ValidationError::new(
            Field::Email,
            "Enter a valid email address",
        ));
    }

    let password_chars = input.password.chars().count();
    if password_chars < PASSWORD_MIN_CHARS {
        return Err(ValidationError::new(
            Field::Password,
            "Password must be at least 6 characters",
        ));
    }
    if password_chars > PASSWORD_MAX_CHARS {
        return Err(ValidationError::new(Field::Password, "Password is too long"));
    }

    Ok(ValidUser {
        name: input.name.to_string(),
        email,
        password: input.password.to_string(),
    })
}

/// Validates contact input.
///
/// Rule order: name presence, name length, phone format.
///
/// # Errors
/// Returns the first violated rule as `ValidationError`.
pub fn validate_contact(input: &ContactInput<'_>) -> ValidationResult<ValidContact> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::new(Field::Name, "Name is required"));
    }
    if name.chars().count() > CONTACT_NAME_MAX_CHARS {
        return Err(ValidationError::new(Field::Name, "Name is too long"));
    }

    let phone = input.phone.trim();
    if !PHONE_RE.is_match(phone) {
        return Err(ValidationError::new(
            Field::Phone,
            "Enter a valid phone number (7-15 digits)",
        ));
    }

    Ok(ValidContact {
        name: name.to_string(),
        phone: phone.to_string(),
    })
}

// Local part may not start with a dot or contain consecutive dots.
fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}
