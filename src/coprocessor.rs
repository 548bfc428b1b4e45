// CLASSIFICATION: COMMUNITY
// Filename: coprocessor.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19
//
// ─────────────────────────────────────────────────────────────
// Platform seam for the I/O co-processor
//
// The bring-up sequencer never touches hardware directly. The
// platform layer implements [`Coprocessor`] on top of its command
// channel; every request blocks until the co-processor replies.
//
// Status convention for all signed replies: `>= 0` is success,
// `< 0` is an implementation-defined failure code.
// ─────────────────────────────────────────────────────────────

use core::fmt;

use crate::firmware::FirmwareModule;

/// Compatibility patches applied before any module is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompatPatch {
    /// Allow modules to be executed from a memory buffer instead of a file.
    EnableBufferLoading,
    /// Drop the requirement that module names carry a device prefix.
    DisablePrefixCheck,
    /// Pass raw file I/O through the command channel.
    FileIoPassthrough,
}

impl CompatPatch {
    /// Application order.
    pub const ALL: [CompatPatch; 3] = [
        CompatPatch::EnableBufferLoading,
        CompatPatch::DisablePrefixCheck,
        CompatPatch::FileIoPassthrough,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CompatPatch::EnableBufferLoading => "enable_lmb",
            CompatPatch::DisablePrefixCheck => "disable_prefix_check",
            CompatPatch::FileIoPassthrough => "fileio",
        }
    }
}

impl fmt::Display for CompatPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Device status queries ("stat path").
pub trait DeviceProbe {
    /// Query `path`; `0` means the device answered.
    fn stat(&mut self, path: &str) -> i32;
}

/// Command-channel primitives supplied by the platform layer.
pub trait Coprocessor: DeviceProbe {
    /// Initialise (or reinitialise) the RPC command channel.
    fn init_channel(&mut self);

    /// Issue a reset request; `true` once the co-processor acknowledged it.
    fn request_reset(&mut self) -> bool;

    /// Poll channel synchronisation; `true` once synchronised.
    fn poll_sync(&mut self) -> bool;

    /// Apply one compatibility patch and return its status.
    fn apply_patch(&mut self, patch: CompatPatch) -> i32;

    /// Execute `module` from its memory buffer with no arguments.
    fn load_module_buffer(&mut self, module: &FirmwareModule) -> i32;
}

impl<T: DeviceProbe + ?Sized> DeviceProbe for &mut T {
    fn stat(&mut self, path: &str) -> i32 {
        (**self).stat(path)
    }
}

impl<T: Coprocessor + ?Sized> Coprocessor for &mut T {
    fn init_channel(&mut self) {
        (**self).init_channel()
    }

    fn request_reset(&mut self) -> bool {
        (**self).request_reset()
    }

    fn poll_sync(&mut self) -> bool {
        (**self).poll_sync()
    }

    fn apply_patch(&mut self, patch: CompatPatch) -> i32 {
        (**self).apply_patch(patch)
    }

    fn load_module_buffer(&mut self, module: &FirmwareModule) -> i32 {
        (**self).load_module_buffer(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patches_apply_in_fixed_order() {
        let names: Vec<_> = CompatPatch::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["enable_lmb", "disable_prefix_check", "fileio"]);
    }
}
