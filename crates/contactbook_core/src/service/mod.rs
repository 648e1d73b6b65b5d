//! Core use-case services.
//!
//! # Responsibility
//! - Run the checks a UI performs before dispatching a store mutation:
//!   field validation, duplicate email, credential match, signed-in user.
//! - Report each rejected request as a typed error instead of a silent no-op.
//!
//! # Invariants
//! - Services mutate state only through `AppStore`, so write-through
//!   persistence is never bypassed.
//! - A rejected request leaves store state and storage untouched.

pub mod account_service;
pub mod contact_service;
