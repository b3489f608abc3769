use std::f32::consts::{FRAC_PI_2, FRAC_PI_6};

use crate::frame::KernelError;

/// Kernel configuration: the recycle radius, the sway-effect radius, the
/// maximum lean angle, and the parallel batch granularity.
///
/// Fixed for the lifetime of a kernel run; every frame reads the same
/// values. `batch_size` tunes how work is split across worker threads and
/// never affects results.
#[derive(Debug, Clone, Copy)]
pub struct KernelConfig {
    /// Dynamic blades drifting beyond this distance from the anchor are
    /// recycled back onto the circle of this radius.
    pub max_dist: f32,
    /// Blades closer than this to the anchor lean away from it. Must be
    /// smaller than `max_dist`.
    pub close_threshold: f32,
    /// Lean angle at zero distance, in radians.
    pub max_lean: f32,
    /// Minimum number of blades per parallel work item.
    pub batch_size: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            max_dist: 40.0,
            close_threshold: 2.5,
            max_lean: FRAC_PI_6,
            batch_size: 32,
        }
    }
}

impl KernelConfig {
    pub fn max_dist_sq(&self) -> f32 {
        self.max_dist * self.max_dist
    }

    pub fn close_threshold_sq(&self) -> f32 {
        self.close_threshold * self.close_threshold
    }

    /// Check the configuration before use.
    pub fn validate(&self) -> Result<(), KernelError> {
        if !self.max_dist.is_finite() || self.max_dist <= 0.0 {
            return Err(KernelError::InvalidConfig(format!(
                "max_dist must be positive and finite, got {}",
                self.max_dist
            )));
        }
        if !self.close_threshold.is_finite() || self.close_threshold <= 0.0 {
            return Err(KernelError::InvalidConfig(format!(
                "close_threshold must be positive and finite, got {}",
                self.close_threshold
            )));
        }
        if self.close_threshold >= self.max_dist {
            return Err(KernelError::InvalidConfig(format!(
                "close_threshold {} must be smaller than max_dist {}",
                self.close_threshold, self.max_dist
            )));
        }
        if !(self.max_lean > 0.0 && self.max_lean <= FRAC_PI_2) {
            return Err(KernelError::InvalidConfig(format!(
                "max_lean must be in (0, pi/2], got {}",
                self.max_lean
            )));
        }
        Ok(())
    }
}
