// CLASSIFICATION: COMMUNITY
// Filename: registry.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Catalog of firmware images available to the bring-up sequence.
//!
//! Images live for the whole process. Builds with the
//! `embedded-firmware` feature link them into the binary; hosts can
//! instead read them from a directory once at startup.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use super::module::{FirmwareModule, ModuleId};
use crate::error::BringUpError;

/// Table from [`ModuleId`] to its firmware image.
#[derive(Debug, Clone, Default)]
pub struct FirmwareRegistry {
    images: [Option<&'static [u8]>; ModuleId::COUNT],
}

impl FirmwareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the image for `id`.
    pub fn register(&mut self, id: ModuleId, image: &'static [u8]) -> &mut Self {
        self.images[id.index()] = Some(image);
        self
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.images[id.index()].is_some()
    }

    /// Resolve `id` to a loadable module record.
    pub fn module(&self, id: ModuleId) -> Result<FirmwareModule, BringUpError> {
        self.images[id.index()]
            .map(|image| FirmwareModule::new(id, image))
            .ok_or(BringUpError::MissingFirmware { module: id.name() })
    }

    /// Identifiers with a registered image, in catalog order.
    pub fn registered(&self) -> impl Iterator<Item = ModuleId> + '_ {
        ModuleId::ALL.into_iter().filter(|id| self.contains(*id))
    }

    /// Read every `<module>.irx` present in `dir`. Missing files are skipped;
    /// the orchestrator reports them only if a selected group needs them.
    pub fn load_dir(dir: &Path) -> io::Result<Self> {
        let mut registry = Self::new();
        for id in ModuleId::ALL {
            let path = dir.join(id.file_name());
            match fs::read(&path) {
                Ok(bytes) => {
                    debug!("[iop] firmware {} <- {} ({} bytes)", id, path.display(), bytes.len());
                    registry.register(id, Box::leak(bytes.into_boxed_slice()));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(registry)
    }

    /// Images linked into the binary from `$IOP_FIRMWARE_DIR` at build time.
    #[cfg(feature = "embedded-firmware")]
    pub fn embedded() -> Self {
        macro_rules! embed {
            ($file:literal) => {
                include_bytes!(concat!(env!("IOP_FIRMWARE_DIR"), "/", $file)) as &'static [u8]
            };
        }

        let mut registry = Self::new();
        registry
            .register(ModuleId::IomanX, embed!("iomanX.irx"))
            .register(ModuleId::FileXio, embed!("fileXio.irx"))
            .register(ModuleId::Sio2man, embed!("sio2man.irx"))
            .register(ModuleId::Padman, embed!("padman.irx"))
            .register(ModuleId::Libsd, embed!("libsd.irx"))
            .register(ModuleId::Audsrv, embed!("audsrv.irx"))
            .register(ModuleId::Bdm, embed!("bdm.irx"))
            .register(ModuleId::BdmfsFatfs, embed!("bdmfs_fatfs.irx"))
            .register(ModuleId::Ps2hdd, embed!("ps2hdd.irx"))
            .register(ModuleId::Ps2fs, embed!("ps2fs.irx"))
            .register(ModuleId::Ps2dev9, embed!("ps2dev9.irx"));
        #[cfg(feature = "usbd-mini")]
        {
            registry
                .register(ModuleId::UsbdMini, embed!("usbd_mini.irx"))
                .register(ModuleId::UsbmassBdMini, embed!("usbmass_bd_mini.irx"));
        }
        #[cfg(not(feature = "usbd-mini"))]
        {
            registry
                .register(ModuleId::Usbd, embed!("usbd.irx"))
                .register(ModuleId::UsbmassBd, embed!("usbmass_bd.irx"));
        }
        #[cfg(feature = "legacy-atad")]
        {
            registry.register(ModuleId::Ps2atad, embed!("ps2atad.irx"));
        }
        registry
    }
}
