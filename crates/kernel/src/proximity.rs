use glam::{Quat, Vec3};
use rayon::prelude::*;
use verdant_common::AnchorPose;

use crate::config::KernelConfig;

/// Stage 1: per-blade recycling and sway, independent across indices.
///
/// Reads only the anchor pose and the blade's own snapshot row; writes only
/// that index's candidate slots. The caller must pass an already-flattened
/// anchor pose.
pub fn proximity_pass(
    anchor: &AnchorPose,
    positions: &[Vec3],
    dynamic: &[bool],
    config: &KernelConfig,
    candidate_positions: &mut [Vec3],
    candidate_rotations: &mut [Quat],
) {
    candidate_positions
        .par_iter_mut()
        .zip(candidate_rotations.par_iter_mut())
        .zip(positions.par_iter().zip(dynamic.par_iter()))
        .with_min_len(config.batch_size.max(1))
        .for_each(|((candidate, rotation), (position, is_dynamic))| {
            let (p, r) = blade_candidate(anchor, *position, *is_dynamic, config);
            *candidate = p;
            *rotation = r;
        });
}

/// Candidate position and sway rotation for a single blade.
///
/// Recycling only applies to dynamic blades; sway applies to every blade.
/// Every candidate is seeded with the blade's current position, so the
/// occlusion stage always tests a real coordinate.
pub fn blade_candidate(
    anchor: &AnchorPose,
    position: Vec3,
    dynamic: bool,
    config: &KernelConfig,
) -> (Vec3, Quat) {
    let to_anchor = anchor.position - position;
    let dist_sq = to_anchor.length_squared();

    let mut candidate = position;
    if dynamic && dist_sq > config.max_dist_sq() {
        // dist_sq > max_dist_sq > 0, so the direction is well defined.
        // The blade re-enters the circle on the opposite side of the anchor.
        candidate = anchor.position + to_anchor.normalize() * config.max_dist;
    }

    let rotation = if dist_sq < config.close_threshold_sq() {
        let t = 1.0 - dist_sq / config.close_threshold_sq();
        // Which lateral side of the anchor the blade sits on. The exact-zero
        // case (straight ahead/behind, or a blade sitting on the anchor)
        // breaks to +1.
        let side = if anchor.right.dot(-to_anchor) < 0.0 {
            -1.0
        } else {
            1.0
        };
        Quat::from_axis_angle(anchor.forward, t * config.max_lean * side)
    } else {
        Quat::IDENTITY
    };

    (candidate, rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> KernelConfig {
        KernelConfig {
            max_dist: 10.0,
            close_threshold: 2.0,
            ..KernelConfig::default()
        }
    }

    fn anchor_at_origin() -> AnchorPose {
        AnchorPose::default()
    }

    fn lean_angle(rotation: Quat, forward: Vec3) -> f32 {
        let (axis, angle) = rotation.to_axis_angle();
        if angle == 0.0 {
            0.0
        } else {
            angle * axis.dot(forward).signum()
        }
    }

    #[test]
    fn blade_inside_radius_keeps_position() {
        let config = test_config();
        let pos = Vec3::new(3.0, 0.0, 4.0); // distance 5 < 10
        let (candidate, _) = blade_candidate(&anchor_at_origin(), pos, true, &config);
        assert_eq!(candidate, pos);
    }

    #[test]
    fn blade_on_boundary_keeps_position() {
        let config = test_config();
        let pos = Vec3::new(0.0, 0.0, 10.0); // exactly max_dist
        let (candidate, _) = blade_candidate(&anchor_at_origin(), pos, true, &config);
        assert_eq!(candidate, pos);
    }

    #[test]
    fn drifted_blade_recycles_onto_circle() {
        let config = test_config();
        let anchor = anchor_at_origin();
        let pos = Vec3::new(0.0, 0.0, 20.0);
        let (candidate, _) = blade_candidate(&anchor, pos, true, &config);

        assert!((candidate.distance(anchor.position) - config.max_dist).abs() < 1e-4);
        // Re-enters along the blade-to-anchor direction, past the anchor
        let expected = anchor.position + (anchor.position - pos).normalize() * config.max_dist;
        assert!(candidate.distance(expected) < 1e-4);
        assert_eq!(candidate, Vec3::new(0.0, 0.0, -10.0));
    }

    #[test]
    fn recycling_skips_non_dynamic_blades() {
        let config = test_config();
        let pos = Vec3::new(0.0, 0.0, 50.0);
        let (candidate, _) = blade_candidate(&anchor_at_origin(), pos, false, &config);
        assert_eq!(candidate, pos);
    }

    #[test]
    fn candidate_is_seeded_for_non_dynamic_blades() {
        let config = test_config();
        let pos = Vec3::new(1.0, 0.0, 1.0);
        let (candidate, _) = blade_candidate(&anchor_at_origin(), pos, false, &config);
        assert_eq!(candidate, pos);
    }

    #[test]
    fn sway_matches_reference_example() {
        // Anchor at origin facing +Z, blade at (0,0,1): distance 1 inside
        // threshold 2, lateral dot is exactly zero so the side defaults to +1.
        let config = test_config();
        let (_, rotation) = blade_candidate(&anchor_at_origin(), Vec3::new(0.0, 0.0, 1.0), true, &config);
        let expected = 0.75 * config.max_lean;
        assert!((lean_angle(rotation, Vec3::Z) - expected).abs() < 1e-5);
    }

    #[test]
    fn sway_is_identity_outside_threshold() {
        let config = test_config();
        let (_, rotation) = blade_candidate(&anchor_at_origin(), Vec3::new(0.0, 0.0, 2.0), true, &config);
        assert_eq!(rotation, Quat::IDENTITY);

        let (_, rotation) = blade_candidate(&anchor_at_origin(), Vec3::new(0.0, 0.0, 5.0), true, &config);
        assert_eq!(rotation, Quat::IDENTITY);
    }

    #[test]
    fn sway_decays_monotonically_with_distance() {
        let config = test_config();
        let mut last = f32::INFINITY;
        for step in 0..20 {
            let z = step as f32 * 0.1;
            let (_, rotation) = blade_candidate(&anchor_at_origin(), Vec3::new(0.0, 0.0, z), true, &config);
            let angle = lean_angle(rotation, Vec3::Z).abs();
            assert!(angle < last);
            last = angle;
        }
    }

    #[test]
    fn sway_reaches_maximum_at_zero_distance() {
        // Blade exactly at the anchor: no NaN, full lean, default side.
        let config = test_config();
        let (candidate, rotation) = blade_candidate(&anchor_at_origin(), Vec3::ZERO, true, &config);
        assert_eq!(candidate, Vec3::ZERO);
        assert!(rotation.is_finite());
        assert!((lean_angle(rotation, Vec3::Z) - config.max_lean).abs() < 1e-5);
    }

    #[test]
    fn sway_sign_flips_across_the_anchor() {
        let config = test_config();
        let anchor = anchor_at_origin(); // facing +Z, right +X

        let (_, right_side) = blade_candidate(&anchor, Vec3::new(1.0, 0.0, 0.0), true, &config);
        let (_, left_side) = blade_candidate(&anchor, Vec3::new(-1.0, 0.0, 0.0), true, &config);

        let right_angle = lean_angle(right_side, Vec3::Z);
        let left_angle = lean_angle(left_side, Vec3::Z);
        assert!(right_angle > 0.0);
        assert!(left_angle < 0.0);
        assert!((right_angle + left_angle).abs() < 1e-5);
    }

    #[test]
    fn pass_matches_per_blade_function() {
        let config = KernelConfig {
            batch_size: 2,
            ..test_config()
        };
        let anchor = AnchorPose::new(Vec3::new(5.0, 0.0, 5.0), Vec3::Z, Vec3::X);
        let positions: Vec<Vec3> = (0..37)
            .map(|i| Vec3::new((i % 7) as f32 * 3.0, 0.0, (i / 7) as f32 * 3.0))
            .collect();
        let dynamic: Vec<bool> = (0..37).map(|i| i % 3 != 0).collect();

        let mut candidates = vec![Vec3::ZERO; 37];
        let mut rotations = vec![Quat::IDENTITY; 37];
        proximity_pass(
            &anchor,
            &positions,
            &dynamic,
            &config,
            &mut candidates,
            &mut rotations,
        );

        for i in 0..37 {
            let (p, r) = blade_candidate(&anchor, positions[i], dynamic[i], &config);
            assert_eq!(candidates[i], p);
            assert_eq!(rotations[i], r);
        }
    }
}
