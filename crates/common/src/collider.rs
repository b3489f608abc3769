use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A static obstacle blades are tested against.
///
/// Colliders never move; the field store holds the authoritative list and
/// the kernel snapshots it fresh each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    Box { center: Vec3, half_extents: Vec3 },
    Sphere { center: Vec3, radius: f32 },
}

impl Collider {
    /// Whether a point lies inside this collider (boundary inclusive).
    pub fn contains_point(&self, point: Vec3) -> bool {
        match *self {
            Collider::Box {
                center,
                half_extents,
            } => {
                let d = (point - center).abs();
                d.x <= half_extents.x && d.y <= half_extents.y && d.z <= half_extents.z
            }
            Collider::Sphere { center, radius } => {
                center.distance_squared(point) <= radius * radius
            }
        }
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::Box {
            center: Vec3::ZERO,
            half_extents: Vec3::splat(0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_contains_center_and_faces() {
        let b = Collider::Box {
            center: Vec3::new(1.0, 0.0, 1.0),
            half_extents: Vec3::new(0.5, 1.0, 0.5),
        };
        assert!(b.contains_point(Vec3::new(1.0, 0.0, 1.0)));
        // On the boundary counts as inside
        assert!(b.contains_point(Vec3::new(1.5, 0.0, 1.0)));
        assert!(!b.contains_point(Vec3::new(1.6, 0.0, 1.0)));
    }

    #[test]
    fn box_containment_is_componentwise() {
        let b = Collider::Box {
            center: Vec3::ZERO,
            half_extents: Vec3::new(1.0, 1.0, 1.0),
        };
        // Inside on x and z but above on y
        assert!(!b.contains_point(Vec3::new(0.5, 2.0, 0.5)));
    }

    #[test]
    fn sphere_containment_uses_squared_distance() {
        let s = Collider::Sphere {
            center: Vec3::new(0.0, 0.0, 2.0),
            radius: 1.0,
        };
        assert!(s.contains_point(Vec3::new(0.0, 0.0, 2.0)));
        assert!(s.contains_point(Vec3::new(0.0, 0.0, 3.0)));
        assert!(!s.contains_point(Vec3::new(0.0, 0.0, 3.01)));
    }
}
