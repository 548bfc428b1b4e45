// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.1
// Date Modified: 2026-10-19
// Author: Lukas Bower

//! I/O co-processor bring-up.
//!
//! Resets the co-processor, applies the compatibility patches buffer
//! loading depends on, then loads firmware modules group by group in
//! dependency order and waits for USB storage to become queryable.
//!
//! ```
//! use iop_bringup::sim::{synthetic_registry, SimulatedCoprocessor};
//! use iop_bringup::{BringUpOrchestrator, BringUpState, BuildProfile, LoaderConfig, NoDelay};
//! use std::sync::Arc;
//!
//! let mut orch = BringUpOrchestrator::with_state(
//!     SimulatedCoprocessor::new(),
//!     NoDelay,
//!     synthetic_registry(),
//!     BuildProfile::default(),
//!     Arc::new(BringUpState::new()),
//! );
//! let report = orch.bring_up(LoaderConfig::default()).unwrap();
//! assert_eq!(report.loaded.last(), Some(&"audsrv_irx"));
//! ```

/// Loader options and TOML configuration.
pub mod config;

/// Platform seam: command channel and device probe traits.
pub mod coprocessor;

/// Fatal error taxonomy.
pub mod error;

/// Process-termination boundary.
pub mod fatal;

/// Firmware catalog, groups and build profile.
pub mod firmware;

/// Module and group loading.
pub mod loader;

/// Top-level bring-up sequencing.
pub mod orchestrator;

/// Bounded readiness polling and delay primitives.
pub mod readiness;

/// Reset and compatibility patching.
pub mod reset;

/// Host-side co-processor simulator.
pub mod sim;

/// At-most-once bring-up state.
pub mod state;

pub use config::{BootConfig, ConfigError, LoaderConfig};
pub use coprocessor::{CompatPatch, Coprocessor, DeviceProbe};
pub use error::BringUpError;
pub use firmware::{
    BringUpPlan, BuildProfile, FirmwareModule, FirmwareRegistry, ModuleGroup, ModuleId,
    UsbDriverSet,
};
pub use loader::{LoadOutcome, ModuleLoader};
pub use orchestrator::{BringUpOrchestrator, BringUpReport, BringUpStatus};
pub use readiness::{Delay, DurationDelay, NoDelay, ReadinessPoller, SpinDelay};
pub use reset::ResetSequencer;
pub use state::{BringUpPhase, BringUpState};
