// CLASSIFICATION: COMMUNITY
// Filename: measure.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19
//
// ─────────────────────────────────────────────────────────────
// Firmware load measurement
//
// Every module handed to the co-processor is folded into a
// running SHA‑256 chain, TPM PCR style, so two bring-ups can be
// compared by a single 32‑byte value.
//
// # Public API
// * [`extend_measurement`] – in‑place `M := SHA256(M || name || image)`.
// * [`image_digest`]       – hex digest of one image.
// ─────────────────────────────────────────────────────────────

use sha2::{Digest, Sha256};

use super::module::FirmwareModule;

/// Extend a 32‑byte measurement with one loaded module **in place**.
pub fn extend_measurement(measurement: &mut [u8; 32], module: &FirmwareModule) {
    let mut hasher = Sha256::new();
    hasher.update(&measurement[..]);
    hasher.update(module.name.as_bytes());
    hasher.update(module.image.bytes());
    *measurement = hasher.finalize().into();
}

/// Lowercase hex SHA‑256 of a module image.
pub fn image_digest(module: &FirmwareModule) -> String {
    hex::encode(Sha256::digest(module.image.bytes()))
}
