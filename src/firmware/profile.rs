// CLASSIFICATION: COMMUNITY
// Filename: profile.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Build-time module variant selection, chosen once per bring-up.

use serde::Deserialize;

/// Which USB host / mass-storage driver pair to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsbDriverSet {
    #[default]
    Standard,
    Minimal,
}

/// Module variants and reset behaviour fixed for one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildProfile {
    /// Overriding this from a config file only works if the registry holds
    /// images for the chosen pair. `FirmwareRegistry::embedded()` links just
    /// the pair selected by `usbd-mini`; see `BootConfig::check_firmware`.
    pub usb_driver: UsbDriverSet,
    /// Load the legacy ATA driver after the fixed-disk modules.
    pub legacy_disk_driver: bool,
    /// Reset and resync the co-processor before patching.
    pub full_reset: bool,
}

impl BuildProfile {
    /// Profile selected by the crate's cargo features.
    pub const fn compiled() -> Self {
        Self {
            usb_driver: if cfg!(feature = "usbd-mini") {
                UsbDriverSet::Minimal
            } else {
                UsbDriverSet::Standard
            },
            legacy_disk_driver: cfg!(feature = "legacy-atad"),
            full_reset: cfg!(feature = "full-reset"),
        }
    }
}

impl Default for BuildProfile {
    fn default() -> Self {
        Self::compiled()
    }
}
