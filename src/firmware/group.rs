// CLASSIFICATION: COMMUNITY
// Filename: group.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19
//
// ─────────────────────────────────────────────────────────────
// Module groups and their load order
//
// Ordering constraints encoded here:
//  * CoreIo precedes every storage group (storage mounts its
//    filesystem through the extended I/O manager).
//  * Audio is always last; the audio service claims its driver
//    resources only once everything else is up.
// ─────────────────────────────────────────────────────────────

use core::fmt;

use super::module::ModuleId;
use super::profile::{BuildProfile, UsbDriverSet};
use crate::config::LoaderConfig;

/// A dependency-ordered subset of modules serving one functional area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleGroup {
    CoreIo,
    Input,
    UsbStorage,
    FixedDisk,
    Audio,
}

const CORE_IO: &[ModuleId] = &[ModuleId::IomanX, ModuleId::FileXio];
const INPUT: &[ModuleId] = &[ModuleId::Sio2man, ModuleId::Padman];
const AUDIO: &[ModuleId] = &[ModuleId::Libsd, ModuleId::Audsrv];
const USB_STANDARD: &[ModuleId] = &[
    ModuleId::Usbd,
    ModuleId::UsbmassBd,
    ModuleId::Bdm,
    ModuleId::BdmfsFatfs,
];
const USB_MINIMAL: &[ModuleId] = &[
    ModuleId::UsbdMini,
    ModuleId::UsbmassBdMini,
    ModuleId::Bdm,
    ModuleId::BdmfsFatfs,
];
const FIXED_DISK: &[ModuleId] = &[ModuleId::Ps2hdd, ModuleId::Ps2fs, ModuleId::Ps2dev9];
const FIXED_DISK_LEGACY: &[ModuleId] = &[
    ModuleId::Ps2hdd,
    ModuleId::Ps2fs,
    ModuleId::Ps2dev9,
    ModuleId::Ps2atad,
];

impl ModuleGroup {
    /// Modules of this group, in load order, for the given profile.
    pub fn modules(self, profile: &BuildProfile) -> &'static [ModuleId] {
        match self {
            ModuleGroup::CoreIo => CORE_IO,
            ModuleGroup::Input => INPUT,
            ModuleGroup::UsbStorage => match profile.usb_driver {
                UsbDriverSet::Standard => USB_STANDARD,
                UsbDriverSet::Minimal => USB_MINIMAL,
            },
            ModuleGroup::FixedDisk if profile.legacy_disk_driver => FIXED_DISK_LEGACY,
            ModuleGroup::FixedDisk => FIXED_DISK,
            ModuleGroup::Audio => AUDIO,
        }
    }

    /// Audio diagnostics are always emitted.
    pub fn verbose(self, requested: bool) -> bool {
        requested || self == ModuleGroup::Audio
    }

    /// Optional storage groups, which get start/finish banners in verbose mode.
    pub fn is_storage(self) -> bool {
        matches!(self, ModuleGroup::UsbStorage | ModuleGroup::FixedDisk)
    }

    pub fn name(self) -> &'static str {
        match self {
            ModuleGroup::CoreIo => "core-io",
            ModuleGroup::Input => "input",
            ModuleGroup::UsbStorage => "usb-storage",
            ModuleGroup::FixedDisk => "fixed-disk",
            ModuleGroup::Audio => "audio",
        }
    }
}

impl fmt::Display for ModuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of groups selected by a [`LoaderConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BringUpPlan {
    groups: Vec<ModuleGroup>,
}

impl BringUpPlan {
    pub fn new(config: &LoaderConfig) -> Self {
        let mut groups = vec![ModuleGroup::CoreIo, ModuleGroup::Input];
        if config.include_usb_storage {
            groups.push(ModuleGroup::UsbStorage);
        }
        if config.include_fixed_disk_storage {
            groups.push(ModuleGroup::FixedDisk);
        }
        groups.push(ModuleGroup::Audio);
        Self { groups }
    }

    pub fn groups(&self) -> &[ModuleGroup] {
        &self.groups
    }

    /// Every module of the plan, flattened in load order.
    pub fn modules<'a>(
        &'a self,
        profile: &'a BuildProfile,
    ) -> impl Iterator<Item = (ModuleGroup, ModuleId)> + 'a {
        self.groups
            .iter()
            .flat_map(move |g| g.modules(profile).iter().map(move |id| (*g, *id)))
    }
}
