use glam::{Quat, Vec3};
use verdant_common::BladeId;
use verdant_field::{BladeWriter, FieldError};

/// Stage 3: sequential write-back of frame results into the store.
///
/// The only stage allowed to mutate blade records, and idempotent per
/// blade: re-running it with the same inputs writes the same values.
/// Orientation is written for every blade; position and suppression only
/// for dynamic blades, so non-dynamic records keep their stored position
/// and visibility untouched.
pub fn commit_pass<W: BladeWriter>(
    writer: &mut W,
    ids: &[BladeId],
    dynamic: &[bool],
    candidate_positions: &[Vec3],
    candidate_rotations: &[Quat],
    blocked: &[bool],
) -> Result<(), FieldError> {
    for i in 0..ids.len() {
        writer.write_orientation(ids[i], candidate_rotations[i])?;
        if !dynamic[i] {
            continue;
        }
        writer.write_position(ids[i], candidate_positions[i])?;
        writer.write_suppressed(ids[i], blocked[i])?;
    }
    Ok(())
}
