// CLASSIFICATION: COMMUNITY
// Filename: error.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Error taxonomy for co-processor bring-up.
//!
//! Every [`BringUpError`] is fatal: the co-processor is left partially
//! loaded and nothing can be unwound. Soft conditions (device readiness
//! timeout, repeated invocation) never surface as errors; they are logged
//! and reported through [`crate::BringUpReport`].

use thiserror::Error;

use crate::coprocessor::CompatPatch;

/// Fatal failures raised while resetting, patching or loading modules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BringUpError {
    #[error("failed to apply compatibility patch {patch} (status {code})")]
    PatchFailed { patch: CompatPatch, code: i32 },
    #[error("failed to load module: {module} (status {code})")]
    ModuleLoadFailed { module: &'static str, code: i32 },
    #[error("firmware image for {module} is not registered")]
    MissingFirmware { module: &'static str },
    #[error("a previous bring-up attempt did not complete")]
    Incomplete,
}

impl BringUpError {
    /// All bring-up errors must terminate the process at the outermost boundary.
    pub fn is_fatal(&self) -> bool {
        true
    }

    /// Signed status reported by the co-processor, when there is one.
    pub fn status(&self) -> Option<i32> {
        match self {
            BringUpError::PatchFailed { code, .. } | BringUpError::ModuleLoadFailed { code, .. } => {
                Some(*code)
            }
            BringUpError::MissingFirmware { .. } | BringUpError::Incomplete => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_failed_module() {
        let err = BringUpError::ModuleLoadFailed {
            module: "padman_irx",
            code: -203,
        };
        assert!(err.to_string().contains("padman_irx"));
        assert_eq!(err.status(), Some(-203));
        assert!(err.is_fatal());
    }

    #[test]
    fn message_names_failed_patch() {
        let err = BringUpError::PatchFailed {
            patch: CompatPatch::DisablePrefixCheck,
            code: -1,
        };
        assert!(err.to_string().contains("disable_prefix_check"));
    }
}
