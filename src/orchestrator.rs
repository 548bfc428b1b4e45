// CLASSIFICATION: COMMUNITY
// Filename: orchestrator.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19
//
// ─────────────────────────────────────────────────────────────
// Co-processor bring-up orchestrator
//
// Single synchronous entry point. Sequence:
//
//  1. Claim [`BringUpState`]. No-op if already loaded; a caller racing
//     an attempt in progress waits for it to settle.
//  2. Reset (full-reset profiles) and apply compatibility patches.
//  3. Load groups: core I/O, input, [USB storage + readiness wait],
//     [fixed disk], audio.
//  4. Mark the state loaded.
//
// Any module or patch failure aborts the sequence immediately and
// marks the state failed. A USB device that never becomes ready
// is only a warning.
// ─────────────────────────────────────────────────────────────

use std::sync::Arc;

use log::{info, warn};

use crate::config::LoaderConfig;
use crate::coprocessor::Coprocessor;
use crate::error::BringUpError;
use crate::fatal;
use crate::firmware::measure::extend_measurement;
use crate::firmware::{BringUpPlan, BuildProfile, FirmwareRegistry, ModuleGroup};
use crate::loader::ModuleLoader;
use crate::readiness::{Delay, ReadinessPoller, USB_MOUNT_PATH};
use crate::reset::ResetSequencer;
use crate::state::{BringUpPhase, BringUpState};

/// How a `bring_up` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUpStatus {
    /// This call ran the full sequence.
    Completed,
    /// Another call completed the sequence, before or concurrently with
    /// this one; nothing was done.
    AlreadyLoaded,
}

/// Summary of a bring-up call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BringUpReport {
    pub status: BringUpStatus,
    /// Module names in the order they were loaded.
    pub loaded: Vec<&'static str>,
    /// `None` when USB storage was not requested.
    pub usb_ready: Option<bool>,
    /// SHA‑256 chain over every loaded module.
    pub measurement: [u8; 32],
}

impl BringUpReport {
    fn skipped() -> Self {
        Self {
            status: BringUpStatus::AlreadyLoaded,
            loaded: Vec::new(),
            usb_ready: None,
            measurement: [0; 32],
        }
    }

    pub fn measurement_hex(&self) -> String {
        hex::encode(self.measurement)
    }
}

/// Owns the platform handle and sequences the whole bring-up.
pub struct BringUpOrchestrator<P, D> {
    platform: P,
    poller: ReadinessPoller<D>,
    registry: FirmwareRegistry,
    profile: BuildProfile,
    state: Arc<BringUpState>,
}

impl<P: Coprocessor, D: Delay> BringUpOrchestrator<P, D> {
    /// Orchestrator bound to the process-wide [`BringUpState::global`].
    pub fn new(platform: P, delay: D, registry: FirmwareRegistry, profile: BuildProfile) -> Self {
        Self::with_state(platform, delay, registry, profile, BringUpState::global())
    }

    /// Orchestrator with an explicitly provided state object.
    pub fn with_state(
        platform: P,
        delay: D,
        registry: FirmwareRegistry,
        profile: BuildProfile,
        state: Arc<BringUpState>,
    ) -> Self {
        Self {
            platform,
            poller: ReadinessPoller::new(delay),
            registry,
            profile,
            state,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn state(&self) -> &Arc<BringUpState> {
        &self.state
    }

    pub fn profile(&self) -> &BuildProfile {
        &self.profile
    }

    pub fn into_platform(self) -> P {
        self.platform
    }

    /// Run bring-up once. Later calls are no-ops; a call that races an
    /// attempt in progress blocks until that attempt settles.
    pub fn bring_up(&mut self, config: LoaderConfig) -> Result<BringUpReport, BringUpError> {
        let settled = match self.state.try_begin() {
            Ok(()) => return self.run_claimed(&config),
            Err(BringUpPhase::InProgress) => {
                info!("[iop] bring-up already in progress; waiting");
                self.state.wait_settled()
            }
            Err(phase) => phase,
        };

        match settled {
            BringUpPhase::Loaded => {
                info!("[iop] modules already loaded");
                Ok(BringUpReport::skipped())
            }
            _ => Err(BringUpError::Incomplete),
        }
    }

    fn run_claimed(&mut self, config: &LoaderConfig) -> Result<BringUpReport, BringUpError> {
        match self.run_sequence(config) {
            Ok(report) => {
                let marked = self.state.mark_loaded();
                debug_assert!(marked, "bring-up state changed under its owner");
                if config.verbose_logging {
                    info!("[iop] bring-up complete ({} modules)", report.loaded.len());
                }
                Ok(report)
            }
            Err(err) => {
                self.state.mark_failed();
                Err(err)
            }
        }
    }

    /// [`bring_up`](Self::bring_up), terminating the process on failure.
    pub fn bring_up_or_terminate(&mut self, config: LoaderConfig) -> BringUpReport {
        fatal::or_terminate(self.bring_up(config))
    }

    fn run_sequence(&mut self, config: &LoaderConfig) -> Result<BringUpReport, BringUpError> {
        ResetSequencer::new(self.profile.full_reset).run(&mut self.platform)?;

        let plan = BringUpPlan::new(config);
        let loader = ModuleLoader::new(&self.registry, self.profile);
        let mut loaded = Vec::new();
        let mut measurement = [0u8; 32];
        let mut usb_ready = None;

        for group in plan.groups().iter().copied() {
            let banner = config.verbose_logging && group.is_storage();
            if banner {
                info!("[iop] loading {} modules...", group.name());
            }
            loader.load_group(&mut self.platform, group, config.verbose_logging, |m| {
                loaded.push(m.name);
                extend_measurement(&mut measurement, m);
            })?;
            if banner {
                info!("[iop] {} modules loaded", group.name());
            }

            if group == ModuleGroup::UsbStorage {
                let ready = self.poller.wait_for_device(&mut self.platform, USB_MOUNT_PATH);
                if ready && config.verbose_logging {
                    info!("[iop] {USB_MOUNT_PATH} ready");
                } else if !ready {
                    warn!("[iop] {USB_MOUNT_PATH} not ready; continuing without USB storage");
                }
                usb_ready = Some(ready);
            }
        }

        Ok(BringUpReport {
            status: BringUpStatus::Completed,
            loaded,
            usb_ready,
            measurement,
        })
    }
}
