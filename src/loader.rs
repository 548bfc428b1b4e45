// CLASSIFICATION: COMMUNITY
// Filename: loader.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Single-module and per-group firmware loading.

use log::info;

use crate::coprocessor::Coprocessor;
use crate::error::BringUpError;
use crate::firmware::{BuildProfile, FirmwareModule, FirmwareRegistry, ModuleGroup};

/// Result of one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Success,
    Failure { module: &'static str, code: i32 },
}

impl LoadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoadOutcome::Success)
    }

    pub fn into_result(self) -> Result<(), BringUpError> {
        match self {
            LoadOutcome::Success => Ok(()),
            LoadOutcome::Failure { module, code } => {
                Err(BringUpError::ModuleLoadFailed { module, code })
            }
        }
    }
}

/// Loads firmware modules into the co-processor, one attempt each.
#[derive(Debug, Clone, Copy)]
pub struct ModuleLoader<'r> {
    registry: &'r FirmwareRegistry,
    profile: BuildProfile,
}

impl<'r> ModuleLoader<'r> {
    pub fn new(registry: &'r FirmwareRegistry, profile: BuildProfile) -> Self {
        Self { registry, profile }
    }

    /// Submit `module` from its buffer with no arguments.
    pub fn load_module<P: Coprocessor + ?Sized>(
        platform: &mut P,
        module: &FirmwareModule,
        verbose: bool,
    ) -> LoadOutcome {
        if verbose {
            info!("[iop] loading {}...", module.name);
        }

        let code = platform.load_module_buffer(module);
        if code < 0 {
            return LoadOutcome::Failure {
                module: module.name,
                code,
            };
        }

        if verbose {
            info!("[iop] {} loaded", module.name);
        }
        LoadOutcome::Success
    }

    /// Load every module of `group` in order, stopping at the first failure.
    /// Each successfully loaded module is passed to `on_loaded`.
    pub fn load_group<P, F>(
        &self,
        platform: &mut P,
        group: ModuleGroup,
        verbose: bool,
        mut on_loaded: F,
    ) -> Result<(), BringUpError>
    where
        P: Coprocessor + ?Sized,
        F: FnMut(&FirmwareModule),
    {
        let verbose = group.verbose(verbose);
        for id in group.modules(&self.profile) {
            let module = self.registry.module(*id)?;
            Self::load_module(platform, &module, verbose).into_result()?;
            on_loaded(&module);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firmware::ModuleId;
    use crate::sim::{synthetic_registry, SimEvent, SimulatedCoprocessor};

    #[test]
    fn negative_status_is_failure_with_name() {
        let mut sim = SimulatedCoprocessor::new().with_failing_module("padman_irx", -400);
        let registry = synthetic_registry();
        let module = registry.module(ModuleId::Padman).unwrap();
        assert_eq!(
            ModuleLoader::load_module(&mut sim, &module, false),
            LoadOutcome::Failure {
                module: "padman_irx",
                code: -400
            }
        );
    }

    #[test]
    fn zero_and_positive_status_succeed() {
        let registry = synthetic_registry();
        let module = registry.module(ModuleId::Sio2man).unwrap();
        let mut sim = SimulatedCoprocessor::new();
        assert!(ModuleLoader::load_module(&mut sim, &module, true).is_success());
        let mut sim = SimulatedCoprocessor::new().with_load_status(7);
        assert!(ModuleLoader::load_module(&mut sim, &module, true).is_success());
    }

    #[test]
    fn group_stops_at_first_failure() {
        let registry = synthetic_registry();
        let loader = ModuleLoader::new(&registry, BuildProfile::compiled());
        let mut sim = SimulatedCoprocessor::new().with_failing_module("iomanX_irx", -1);
        let mut seen = Vec::new();
        let err = loader
            .load_group(&mut sim, ModuleGroup::CoreIo, false, |m| seen.push(m.id))
            .unwrap_err();
        assert_eq!(err, BringUpError::ModuleLoadFailed { module: "iomanX_irx", code: -1 });
        assert!(seen.is_empty());
        assert!(!sim.journal().contains(&SimEvent::Load("fileXio_irx")));
    }

    #[test]
    fn missing_image_aborts_group_before_load() {
        let mut registry = FirmwareRegistry::new();
        registry.register(ModuleId::Sio2man, b"sio");
        let loader = ModuleLoader::new(&registry, BuildProfile::compiled());
        let mut sim = SimulatedCoprocessor::new();
        let err = loader
            .load_group(&mut sim, ModuleGroup::Input, false, |_| {})
            .unwrap_err();
        assert_eq!(err, BringUpError::MissingFirmware { module: "padman_irx" });
        assert_eq!(sim.loaded_modules(), vec!["sio2man_irx"]);
    }
}
