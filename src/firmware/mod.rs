// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19
//
// ─────────────────────────────────────────────────────────────
// Firmware catalog
//
// Compile-time knowledge of which firmware blobs exist, how they
// group, and in which order each group is loaded.
//
// ## Sub‑modules
// * `module`   – [`ModuleId`] and the immutable [`FirmwareModule`].
// * `registry` – image table resolving ids to modules.
// * `group`    – [`ModuleGroup`] ordering and [`BringUpPlan`].
// * `profile`  – build variant selection ([`BuildProfile`]).
// * `measure`  – SHA‑256 load measurement chain.
// ─────────────────────────────────────────────────────────────

pub mod group;
pub mod measure;
pub mod module;
pub mod profile;
pub mod registry;

pub use group::{BringUpPlan, ModuleGroup};
pub use module::{FirmwareImage, FirmwareModule, ModuleId};
pub use profile::{BuildProfile, UsbDriverSet};
pub use registry::FirmwareRegistry;
