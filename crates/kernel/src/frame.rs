use std::time::{Duration, Instant};

use glam::Quat;
use verdant_common::AnchorPose;
use verdant_field::{Field, FieldError, FieldSnapshot};

use crate::buffers::FrameBuffers;
use crate::commit::commit_pass;
use crate::config::KernelConfig;
use crate::occlusion::occlusion_pass;
use crate::proximity::proximity_pass;

#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error(
        "snapshot arrays disagree: ids={ids}, positions={positions}, dynamic={dynamic}, sway_durations={sway_durations}"
    )]
    SnapshotMismatch {
        ids: usize,
        positions: usize,
        dynamic: usize,
        sway_durations: usize,
    },
    #[error("field write failed: {0}")]
    Field(#[from] FieldError),
}

/// Per-frame statistics for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    pub blades: usize,
    pub dynamic_blades: usize,
    pub colliders: usize,
    /// Dynamic blades relocated back onto the recycle circle this frame.
    pub recycled: usize,
    /// Blades leaning away from the anchor this frame.
    pub swaying: usize,
    /// Dynamic blades suppressed because their candidate position hit a
    /// collider.
    pub blocked: usize,
    pub frame_time: Duration,
}

/// Advance the field by one frame.
///
/// Snapshot → proximity (parallel) → occlusion (parallel) → commit
/// (sequential). Each stage finishes for all indices before the next one
/// starts; the two parallel passes share no mutable state across indices.
/// Nothing is written to the store until both parallel stages are done, so
/// an error before the commit pass leaves the field untouched.
pub fn step_frame(
    field: &mut Field,
    anchor: &AnchorPose,
    config: &KernelConfig,
    buffers: &mut FrameBuffers,
) -> Result<FrameStats, KernelError> {
    let _span = tracing::info_span!("step_frame").entered();
    config.validate()?;
    let snapshot = field.snapshot();
    run(field, &snapshot, anchor, config, buffers)
}

fn run(
    field: &mut Field,
    snapshot: &FieldSnapshot,
    anchor: &AnchorPose,
    config: &KernelConfig,
    buffers: &mut FrameBuffers,
) -> Result<FrameStats, KernelError> {
    let frame_start = Instant::now();

    if !snapshot.is_consistent() {
        return Err(KernelError::SnapshotMismatch {
            ids: snapshot.ids.len(),
            positions: snapshot.positions.len(),
            dynamic: snapshot.dynamic.len(),
            sway_durations: snapshot.sway_durations.len(),
        });
    }

    let anchor = anchor.flattened();
    let blades = snapshot.blade_count();
    buffers.reset(blades);

    proximity_pass(
        &anchor,
        &snapshot.positions,
        &snapshot.dynamic,
        config,
        &mut buffers.candidate_positions,
        &mut buffers.candidate_rotations,
    );

    occlusion_pass(
        &buffers.candidate_positions,
        &snapshot.colliders,
        config,
        &mut buffers.blocked,
    );

    commit_pass(
        field,
        &snapshot.ids,
        &snapshot.dynamic,
        &buffers.candidate_positions,
        &buffers.candidate_rotations,
        &buffers.blocked,
    )?;

    let mut stats = FrameStats {
        blades,
        colliders: snapshot.colliders.len(),
        frame_time: frame_start.elapsed(),
        ..FrameStats::default()
    };
    for i in 0..blades {
        if snapshot.dynamic[i] {
            stats.dynamic_blades += 1;
            if buffers.candidate_positions[i] != snapshot.positions[i] {
                stats.recycled += 1;
            }
            if buffers.blocked[i] {
                stats.blocked += 1;
            }
        }
        if buffers.candidate_rotations[i] != Quat::IDENTITY {
            stats.swaying += 1;
        }
    }

    tracing::debug!(
        blades = stats.blades,
        recycled = stats.recycled,
        swaying = stats.swaying,
        blocked = stats.blocked,
        frame_time = ?stats.frame_time,
        "frame complete"
    );

    Ok(stats)
}
