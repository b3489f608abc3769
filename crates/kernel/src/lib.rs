//! Per-frame vegetation kernel: proximity recycling, anchor sway, and
//! collider occlusion over a blade field.
//!
//! # Invariants
//! - Stages run in strict order: proximity, occlusion, commit. Each stage
//!   completes for all indices before the next starts.
//! - The two parallel stages are pure over the frame snapshot; only the
//!   sequential commit pass mutates the store.
//! - Non-dynamic blades never change position or visibility, only lean.
//! - The kernel holds no state between frames beyond the blade records
//!   themselves; the working buffers are reusable scratch.

mod buffers;
mod commit;
mod config;
mod frame;
mod occlusion;
mod proximity;

pub use buffers::FrameBuffers;
pub use commit::commit_pass;
pub use config::KernelConfig;
pub use frame::{FrameStats, KernelError, step_frame};
pub use occlusion::{occlusion_pass, point_blocked};
pub use proximity::{blade_candidate, proximity_pass};

pub fn crate_info() -> &'static str {
    "verdant-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
