//! Shared types for the verdant vegetation kernel.
//!
//! # Invariants
//! - Types here carry no behavior beyond pure geometric queries.
//! - `BladeId` ordering is total, so `BTreeMap` iteration is canonical.

mod collider;
mod types;

pub use collider::Collider;
pub use types::{AnchorPose, BladeId};

pub fn crate_info() -> &'static str {
    "verdant-common v0.1.0"
}
