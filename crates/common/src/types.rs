use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a blade in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BladeId(pub Uuid);

impl BladeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BladeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame pose of the moving anchor blades react to.
///
/// `forward` and `right` are the anchor's orientation basis on the ground
/// plane. The kernel only ever sees a flattened pose: the vertical component
/// of `position` is zeroed so distance checks are planar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPose {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
}

impl AnchorPose {
    pub fn new(position: Vec3, forward: Vec3, right: Vec3) -> Self {
        Self {
            position,
            forward,
            right,
        }
    }

    /// Copy of this pose with the position's vertical component zeroed.
    pub fn flattened(&self) -> Self {
        Self {
            position: Vec3::new(self.position.x, 0.0, self.position.z),
            forward: self.forward,
            right: self.right,
        }
    }
}

impl Default for AnchorPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Z,
            right: Vec3::X,
        }
    }
}
