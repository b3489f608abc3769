//! Blade store: authoritative per-blade records and the static collider list.
//!
//! # Invariants
//! - Iteration order is deterministic (`BTreeMap` keyed by `BladeId`).
//! - A snapshot's index `i` maps to the same blade for the whole frame.
//! - All mutations flow through explicit operations; bulk write-back goes
//!   through the narrow [`BladeWriter`] interface.

mod snapshot;
mod store;

pub use snapshot::FieldSnapshot;
pub use store::{BladeData, BladeWriter, Field, FieldError};

pub fn crate_info() -> &'static str {
    "verdant-field v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("field"));
    }
}
