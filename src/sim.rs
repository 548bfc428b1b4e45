// CLASSIFICATION: COMMUNITY
// Filename: sim.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Host-side co-processor simulation.
//!
//! Records every request in a journal and answers according to a small
//! script: failing modules or patches, how many polls the reset and sync
//! handshakes take, and after how many status queries the USB device
//! appears. Used by the tests, the bench and the `iop-bringup` binary.

use crate::coprocessor::{CompatPatch, Coprocessor, DeviceProbe};
use crate::firmware::{FirmwareModule, FirmwareRegistry, ModuleId};

/// One request observed by the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    ChannelInit,
    ResetRequested,
    SyncPolled,
    Patch(CompatPatch),
    Load(&'static str),
    Stat(String),
}

#[derive(Debug, Clone)]
pub struct SimulatedCoprocessor {
    journal: Vec<SimEvent>,
    failing_module: Option<(String, i32)>,
    failing_patch: Option<(CompatPatch, i32)>,
    load_status: i32,
    reset_ack_after: u32,
    sync_after: u32,
    ready_after: Option<u32>,
    reset_polls: u32,
    sync_polls: u32,
    stat_calls: u32,
}

impl Default for SimulatedCoprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedCoprocessor {
    /// Everything succeeds first time; the device is ready on the first query.
    pub fn new() -> Self {
        Self {
            journal: Vec::new(),
            failing_module: None,
            failing_patch: None,
            load_status: 0,
            reset_ack_after: 1,
            sync_after: 1,
            ready_after: Some(1),
            reset_polls: 0,
            sync_polls: 0,
            stat_calls: 0,
        }
    }

    /// Make loading `name` (symbol or short name) return `code`.
    pub fn with_failing_module(mut self, name: &str, code: i32) -> Self {
        let name = ModuleId::from_name(name)
            .map(|id| id.name().to_string())
            .unwrap_or_else(|| name.to_string());
        self.failing_module = Some((name, code));
        self
    }

    pub fn with_failing_patch(mut self, patch: CompatPatch, code: i32) -> Self {
        self.failing_patch = Some((patch, code));
        self
    }

    /// Status returned by successful loads.
    pub fn with_load_status(mut self, code: i32) -> Self {
        self.load_status = code;
        self
    }

    pub fn with_reset_ack_after(mut self, polls: u32) -> Self {
        self.reset_ack_after = polls.max(1);
        self
    }

    pub fn with_sync_after(mut self, polls: u32) -> Self {
        self.sync_after = polls.max(1);
        self
    }

    /// Device answers from the `n`th status query on; `None` never answers.
    pub fn with_ready_after(mut self, n: Option<u32>) -> Self {
        self.ready_after = n;
        self
    }

    pub fn journal(&self) -> &[SimEvent] {
        &self.journal
    }

    /// Names passed to the module loader, including a failed final attempt.
    pub fn loaded_modules(&self) -> Vec<&'static str> {
        self.journal
            .iter()
            .filter_map(|e| match e {
                SimEvent::Load(name) => Some(*name),
                _ => None,
            })
            .collect()
    }

    pub fn stat_calls(&self) -> u32 {
        self.stat_calls
    }
}

impl DeviceProbe for SimulatedCoprocessor {
    fn stat(&mut self, path: &str) -> i32 {
        self.journal.push(SimEvent::Stat(path.to_string()));
        self.stat_calls += 1;
        match self.ready_after {
            Some(n) if self.stat_calls >= n => 0,
            _ => -19,
        }
    }
}

impl Coprocessor for SimulatedCoprocessor {
    fn init_channel(&mut self) {
        self.journal.push(SimEvent::ChannelInit);
    }

    fn request_reset(&mut self) -> bool {
        self.journal.push(SimEvent::ResetRequested);
        self.reset_polls += 1;
        self.reset_polls >= self.reset_ack_after
    }

    fn poll_sync(&mut self) -> bool {
        self.journal.push(SimEvent::SyncPolled);
        self.sync_polls += 1;
        self.sync_polls >= self.sync_after
    }

    fn apply_patch(&mut self, patch: CompatPatch) -> i32 {
        self.journal.push(SimEvent::Patch(patch));
        match self.failing_patch {
            Some((p, code)) if p == patch => code,
            _ => 0,
        }
    }

    fn load_module_buffer(&mut self, module: &FirmwareModule) -> i32 {
        self.journal.push(SimEvent::Load(module.name));
        match &self.failing_module {
            Some((name, code)) if name == module.name => *code,
            _ => self.load_status,
        }
    }
}

/// Registry with a small placeholder image for every module.
pub fn synthetic_registry() -> FirmwareRegistry {
    let mut registry = FirmwareRegistry::new();
    for id in ModuleId::ALL {
        registry.register(id, id.name().as_bytes());
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_module_accepts_short_name() {
        let registry = synthetic_registry();
        let mut sim = SimulatedCoprocessor::new().with_failing_module("bdm", -9);
        assert_eq!(sim.load_module_buffer(&registry.module(ModuleId::Bdm).unwrap()), -9);
        assert_eq!(sim.load_module_buffer(&registry.module(ModuleId::BdmfsFatfs).unwrap()), 0);
    }

    #[test]
    fn device_never_ready() {
        let mut sim = SimulatedCoprocessor::new().with_ready_after(None);
        assert_eq!(sim.stat("mass:/"), -19);
        assert_eq!(sim.stat("mass:/"), -19);
        assert_eq!(sim.stat_calls(), 2);
    }
}
