use glam::Vec3;
use rayon::prelude::*;
use verdant_common::Collider;

use crate::config::KernelConfig;

/// Stage 2: test every candidate position against every static collider.
///
/// Independent across indices and read-only over the collider list; runs
/// after the proximity pass has filled `candidate_positions` for all
/// indices. An empty collider list blocks nothing.
pub fn occlusion_pass(
    candidate_positions: &[Vec3],
    colliders: &[Collider],
    config: &KernelConfig,
    blocked: &mut [bool],
) {
    blocked
        .par_iter_mut()
        .zip(candidate_positions.par_iter())
        .with_min_len(config.batch_size.max(1))
        .for_each(|(hit, candidate)| {
            *hit = point_blocked(*candidate, colliders);
        });
}

/// Whether a point lies inside any collider.
pub fn point_blocked(point: Vec3, colliders: &[Collider]) -> bool {
    colliders.iter().any(|c| c.contains_point(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacles() -> Vec<Collider> {
        vec![
            Collider::Box {
                center: Vec3::new(5.0, 0.0, 0.0),
                half_extents: Vec3::splat(1.0),
            },
            Collider::Sphere {
                center: Vec3::new(-5.0, 0.0, 0.0),
                radius: 2.0,
            },
        ]
    }

    #[test]
    fn empty_collider_list_blocks_nothing() {
        assert!(!point_blocked(Vec3::ZERO, &[]));

        let mut blocked = vec![true; 3];
        occlusion_pass(
            &[Vec3::ZERO, Vec3::ONE, Vec3::NEG_ONE],
            &[],
            &KernelConfig::default(),
            &mut blocked,
        );
        assert_eq!(blocked, vec![false; 3]);
    }

    #[test]
    fn any_collider_blocks() {
        let colliders = obstacles();
        assert!(point_blocked(Vec3::new(5.0, 0.0, 0.0), &colliders));
        assert!(point_blocked(Vec3::new(-4.0, 0.0, 0.0), &colliders));
        assert!(!point_blocked(Vec3::ZERO, &colliders));
    }

    #[test]
    fn pass_flags_each_index_independently() {
        let colliders = obstacles();
        let candidates = vec![
            Vec3::new(5.5, 0.5, 0.5),  // inside the box
            Vec3::new(0.0, 0.0, 0.0),  // clear
            Vec3::new(-5.0, 1.0, 0.0), // inside the sphere
            Vec3::new(7.0, 0.0, 0.0),  // just past the box
        ];
        let mut blocked = vec![false; candidates.len()];
        occlusion_pass(&candidates, &colliders, &KernelConfig::default(), &mut blocked);
        assert_eq!(blocked, vec![true, false, true, false]);
    }
}
