// CLASSIFICATION: COMMUNITY
// Filename: reset.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Co-processor reset and compatibility patching.
//!
//! The reset acknowledgement and sync polls are unbounded: working
//! hardware always answers, and there is no meaningful recovery if it
//! does not. Patches are each attempted exactly once.

use log::debug;

use crate::coprocessor::{CompatPatch, Coprocessor};
use crate::error::BringUpError;

/// Brings the co-processor into a known, patched state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResetSequencer {
    full_reset: bool,
}

impl ResetSequencer {
    pub fn new(full_reset: bool) -> Self {
        Self { full_reset }
    }

    /// Reset (when enabled) and patch. Must run before any module load.
    pub fn run<P: Coprocessor + ?Sized>(&self, platform: &mut P) -> Result<(), BringUpError> {
        if self.full_reset {
            Self::reset_coprocessor(platform);
        }
        Self::apply_compatibility_patches(platform)
    }

    /// Reset, wait for acknowledgement, resync and reinitialise the channel.
    pub fn reset_coprocessor<P: Coprocessor + ?Sized>(platform: &mut P) {
        platform.init_channel();

        let mut polls = 1u64;
        while !platform.request_reset() {
            polls += 1;
            core::hint::spin_loop();
        }
        debug!("[iop] reset acknowledged after {polls} polls");

        polls = 1;
        while !platform.poll_sync() {
            polls += 1;
            core::hint::spin_loop();
        }
        debug!("[iop] channel synchronised after {polls} polls");

        platform.init_channel();
    }

    /// Apply [`CompatPatch::ALL`] in order; the first negative status is fatal.
    pub fn apply_compatibility_patches<P: Coprocessor + ?Sized>(
        platform: &mut P,
    ) -> Result<(), BringUpError> {
        for patch in CompatPatch::ALL {
            let code = platform.apply_patch(patch);
            if code < 0 {
                return Err(BringUpError::PatchFailed { patch, code });
            }
            debug!("[iop] patch {patch} applied ({code})");
        }
        Ok(())
    }
}
