use glam::Vec3;
use serde::{Deserialize, Serialize};
use verdant_common::{BladeId, Collider};

/// One frame's read-only view of the field, flattened into parallel arrays.
///
/// All blade arrays are index-aligned: index `i` refers to the same blade in
/// `ids`, `positions`, `dynamic`, and `sway_durations`. The id array is the
/// write-back key — results computed for index `i` are committed to
/// `ids[i]`. Suppressed blades are included; they still sway and may be
/// un-suppressed this frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub ids: Vec<BladeId>,
    pub positions: Vec<Vec3>,
    pub dynamic: Vec<bool>,
    pub sway_durations: Vec<f32>,
    pub colliders: Vec<Collider>,
}

impl FieldSnapshot {
    /// Number of blades captured.
    pub fn blade_count(&self) -> usize {
        self.ids.len()
    }

    /// Whether all blade arrays are the same length.
    ///
    /// A snapshot produced by [`crate::Field::snapshot`] is always
    /// consistent; the kernel still checks before writing anything.
    pub fn is_consistent(&self) -> bool {
        let n = self.ids.len();
        self.positions.len() == n && self.dynamic.len() == n && self.sway_durations.len() == n
    }
}
