use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use verdant_common::{BladeId, Collider};

use crate::snapshot::FieldSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("blade {0:?} not found")]
    BladeGone(BladeId),
}

/// Per-blade record stored in the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BladeData {
    pub position: Vec3,
    /// World-space lean, rewritten every frame by the kernel.
    pub orientation: Quat,
    /// Whether this blade participates in recycling and occlusion
    /// suppression. Immutable after creation.
    pub dynamic: bool,
    /// Animation timing parameter consumed by the render layer. The kernel
    /// round-trips it untouched.
    pub sway_duration: f32,
    /// Hides the blade from rendering without removing its record. Only the
    /// kernel's commit pass toggles it, and only for dynamic blades.
    pub suppressed: bool,
}

impl Default for BladeData {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            dynamic: true,
            sway_duration: 1.0,
            suppressed: false,
        }
    }
}

impl BladeData {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn fixed(position: Vec3) -> Self {
        Self {
            position,
            dynamic: false,
            ..Self::default()
        }
    }
}

/// Narrow write interface the kernel's commit pass uses.
///
/// Keeping the seam this thin lets the commit pass run against a mock sink
/// in tests, and keeps every other stage a pure function over arrays.
pub trait BladeWriter {
    fn write_orientation(&mut self, id: BladeId, orientation: Quat) -> Result<(), FieldError>;
    fn write_position(&mut self, id: BladeId, position: Vec3) -> Result<(), FieldError>;
    fn write_suppressed(&mut self, id: BladeId, suppressed: bool) -> Result<(), FieldError>;
}

/// The authoritative blade and collider store.
///
/// Uses `BTreeMap` for deterministic iteration order, so snapshots are
/// canonical across platforms and runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Field {
    blades: BTreeMap<BladeId, BladeData>,
    colliders: Vec<Collider>,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blades in the field.
    pub fn blade_count(&self) -> usize {
        self.blades.len()
    }

    /// Spawn a new blade. Returns its id.
    pub fn spawn(&mut self, data: BladeData) -> BladeId {
        let id = BladeId::new();
        self.spawn_with_id(id, data);
        id
    }

    /// Spawn a blade with a specific id (used by deterministic scatter).
    pub fn spawn_with_id(&mut self, id: BladeId, data: BladeData) {
        self.blades.insert(id, data);
    }

    /// Remove a blade. Returns the record if it existed.
    pub fn despawn(&mut self, id: BladeId) -> Option<BladeData> {
        self.blades.remove(&id)
    }

    pub fn get(&self, id: BladeId) -> Option<&BladeData> {
        self.blades.get(&id)
    }

    /// Read-only access to all blades in canonical order.
    pub fn blades(&self) -> &BTreeMap<BladeId, BladeData> {
        &self.blades
    }

    pub fn add_collider(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn clear_colliders(&mut self) {
        self.colliders.clear();
    }

    /// Bulk snapshot-read of every blade (suppressed ones included) and the
    /// current collider list, flattened into index-aligned arrays.
    pub fn snapshot(&self) -> FieldSnapshot {
        let n = self.blades.len();
        let mut snap = FieldSnapshot {
            ids: Vec::with_capacity(n),
            positions: Vec::with_capacity(n),
            dynamic: Vec::with_capacity(n),
            sway_durations: Vec::with_capacity(n),
            colliders: self.colliders.clone(),
        };
        for (id, data) in &self.blades {
            snap.ids.push(*id);
            snap.positions.push(data.position);
            snap.dynamic.push(data.dynamic);
            snap.sway_durations.push(data.sway_duration);
        }
        tracing::trace!(
            blades = snap.blade_count(),
            colliders = snap.colliders.len(),
            "field snapshot"
        );
        snap
    }

    fn get_mut(&mut self, id: BladeId) -> Result<&mut BladeData, FieldError> {
        self.blades.get_mut(&id).ok_or(FieldError::BladeGone(id))
    }
}

impl BladeWriter for Field {
    fn write_orientation(&mut self, id: BladeId, orientation: Quat) -> Result<(), FieldError> {
        self.get_mut(id)?.orientation = orientation;
        Ok(())
    }

    fn write_position(&mut self, id: BladeId, position: Vec3) -> Result<(), FieldError> {
        self.get_mut(id)?.position = position;
        Ok(())
    }

    fn write_suppressed(&mut self, id: BladeId, suppressed: bool) -> Result<(), FieldError> {
        self.get_mut(id)?.suppressed = suppressed;
        Ok(())
    }
}
