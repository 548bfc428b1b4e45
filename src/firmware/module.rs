// CLASSIFICATION: COMMUNITY
// Filename: module.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Firmware module identities and the immutable module record.

use core::fmt;

/// Every firmware blob the bring-up sequence knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleId {
    IomanX,
    FileXio,
    Sio2man,
    Padman,
    Libsd,
    Audsrv,
    Usbd,
    UsbdMini,
    UsbmassBd,
    UsbmassBdMini,
    Bdm,
    BdmfsFatfs,
    Ps2hdd,
    Ps2fs,
    Ps2dev9,
    Ps2atad,
}

impl ModuleId {
    pub const COUNT: usize = 16;

    pub const ALL: [ModuleId; ModuleId::COUNT] = [
        ModuleId::IomanX,
        ModuleId::FileXio,
        ModuleId::Sio2man,
        ModuleId::Padman,
        ModuleId::Libsd,
        ModuleId::Audsrv,
        ModuleId::Usbd,
        ModuleId::UsbdMini,
        ModuleId::UsbmassBd,
        ModuleId::UsbmassBdMini,
        ModuleId::Bdm,
        ModuleId::BdmfsFatfs,
        ModuleId::Ps2hdd,
        ModuleId::Ps2fs,
        ModuleId::Ps2dev9,
        ModuleId::Ps2atad,
    ];

    /// Symbol name of the embedded blob.
    pub const fn name(self) -> &'static str {
        match self {
            ModuleId::IomanX => "iomanX_irx",
            ModuleId::FileXio => "fileXio_irx",
            ModuleId::Sio2man => "sio2man_irx",
            ModuleId::Padman => "padman_irx",
            ModuleId::Libsd => "libsd_irx",
            ModuleId::Audsrv => "audsrv_irx",
            ModuleId::Usbd => "usbd_irx",
            ModuleId::UsbdMini => "usbd_mini_irx",
            ModuleId::UsbmassBd => "usbmass_bd_irx",
            ModuleId::UsbmassBdMini => "usbmass_bd_mini_irx",
            ModuleId::Bdm => "bdm_irx",
            ModuleId::BdmfsFatfs => "bdmfs_fatfs_irx",
            ModuleId::Ps2hdd => "ps2hdd_irx",
            ModuleId::Ps2fs => "ps2fs_irx",
            ModuleId::Ps2dev9 => "ps2dev9_irx",
            ModuleId::Ps2atad => "ps2atad_irx",
        }
    }

    /// File name used when images are read from a directory.
    pub fn file_name(self) -> String {
        let name = self.name();
        format!("{}.irx", name.strip_suffix("_irx").unwrap_or(name))
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<ModuleId> {
        ModuleId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == name || id.name().strip_suffix("_irx") == Some(name))
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque handle to a firmware binary inside the program image.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FirmwareImage(&'static [u8]);

impl FirmwareImage {
    pub const fn new(bytes: &'static [u8]) -> Self {
        Self(bytes)
    }

    pub const fn as_ptr(&self) -> *const u8 {
        self.0.as_ptr()
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub const fn bytes(&self) -> &'static [u8] {
        self.0
    }
}

impl fmt::Debug for FirmwareImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FirmwareImage({:p}, {} bytes)", self.0.as_ptr(), self.0.len())
    }
}

/// Immutable description of one loadable firmware blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareModule {
    pub id: ModuleId,
    pub name: &'static str,
    pub image: FirmwareImage,
    pub size: usize,
}

impl FirmwareModule {
    pub const fn new(id: ModuleId, bytes: &'static [u8]) -> Self {
        Self {
            id,
            name: id.name(),
            image: FirmwareImage::new(bytes),
            size: bytes.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_every_variant_in_index_order() {
        for (i, id) in ModuleId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn file_name_drops_symbol_suffix() {
        assert_eq!(ModuleId::BdmfsFatfs.file_name(), "bdmfs_fatfs.irx");
        assert_eq!(ModuleId::IomanX.file_name(), "iomanX.irx");
    }

    #[test]
    fn from_name_accepts_both_spellings() {
        assert_eq!(ModuleId::from_name("padman_irx"), Some(ModuleId::Padman));
        assert_eq!(ModuleId::from_name("padman"), Some(ModuleId::Padman));
        assert_eq!(ModuleId::from_name("nope"), None);
    }

    #[test]
    fn size_tracks_image_length() {
        static BLOB: [u8; 7] = [0; 7];
        let module = FirmwareModule::new(ModuleId::Libsd, &BLOB);
        assert_eq!(module.size, 7);
        assert_eq!(module.name, "libsd_irx");
    }
}
