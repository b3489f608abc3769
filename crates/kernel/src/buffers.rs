use glam::{Quat, Vec3};

/// Index-aligned working arrays for one frame.
///
/// Owned by the caller and reusable across frames: `reset` clears and
/// resizes without shrinking capacity, so steady-state frames allocate
/// nothing. Contents are meaningless outside the frame that filled them.
#[derive(Debug, Default)]
pub struct FrameBuffers {
    pub candidate_positions: Vec<Vec3>,
    pub candidate_rotations: Vec<Quat>,
    pub blocked: Vec<bool>,
}

impl FrameBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(blades: usize) -> Self {
        Self {
            candidate_positions: Vec::with_capacity(blades),
            candidate_rotations: Vec::with_capacity(blades),
            blocked: Vec::with_capacity(blades),
        }
    }

    /// Prepare the buffers for a frame over `blades` indices.
    pub fn reset(&mut self, blades: usize) {
        self.candidate_positions.clear();
        self.candidate_positions.resize(blades, Vec3::ZERO);
        self.candidate_rotations.clear();
        self.candidate_rotations.resize(blades, Quat::IDENTITY);
        self.blocked.clear();
        self.blocked.resize(blades, false);
    }

    pub fn len(&self) -> usize {
        self.candidate_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidate_positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_sizes_all_arrays() {
        let mut buffers = FrameBuffers::new();
        buffers.reset(5);
        assert_eq!(buffers.candidate_positions.len(), 5);
        assert_eq!(buffers.candidate_rotations.len(), 5);
        assert_eq!(buffers.blocked.len(), 5);
        assert_eq!(buffers.len(), 5);
    }

    #[test]
    fn reset_reuses_capacity_when_shrinking() {
        let mut buffers = FrameBuffers::with_capacity(100);
        buffers.reset(100);
        let cap = buffers.candidate_positions.capacity();
        buffers.reset(10);
        assert_eq!(buffers.len(), 10);
        assert_eq!(buffers.candidate_positions.capacity(), cap);
    }

    #[test]
    fn reset_clears_stale_values() {
        let mut buffers = FrameBuffers::new();
        buffers.reset(2);
        buffers.blocked[1] = true;
        buffers.candidate_positions[1] = Vec3::ONE;

        buffers.reset(2);
        assert!(!buffers.blocked[1]);
        assert_eq!(buffers.candidate_positions[1], Vec3::ZERO);
    }
}
