//! Flutter-facing bindings for Contactbook core.

pub mod api;
