//! Derived views over contact lists.
//!
//! # Responsibility
//! - Sort contacts by name and slice them into fixed-size pages.
//! - Keep per-screen view state (sort direction, current page) outside the
//!   store.
//!
//! # Invariants
//! - Transforms are pure over their explicit inputs and never mutate store
//!   state.
//! - Callers recompute whenever the underlying list or view state changes.

pub mod contact_list;
pub mod pagination;
pub mod sorting;
