// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Bring-up configuration.
//!
//! [`LoaderConfig`] is what the caller hands to the orchestrator.
//! [`BootConfig`] adds the build profile and can be read from a TOML
//! file, then adjusted through `IOP_USB`, `IOP_HDD` and `IOP_VERBOSE`.
//!
//! ```toml
//! [loader]
//! include_usb_storage = true
//! verbose_logging = true
//!
//! [profile]
//! usb_driver = "minimal"
//! full_reset = true
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::firmware::{BringUpPlan, BuildProfile, FirmwareRegistry};

/// Which optional groups to load, and whether to log per-module progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub include_usb_storage: bool,
    pub include_fixed_disk_storage: bool,
    pub verbose_logging: bool,
}

/// Full configuration: loader options plus module variant selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    pub loader: LoaderConfig,
    pub profile: BuildProfile,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
    #[error("no firmware image for {module} required by the configured profile")]
    MissingFirmware { module: &'static str },
}

pub const ENV_USB: &str = "IOP_USB";
pub const ENV_HDD: &str = "IOP_HDD";
pub const ENV_VERBOSE: &str = "IOP_VERBOSE";

impl BootConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(data)?)
    }

    /// Apply `IOP_USB`, `IOP_HDD` and `IOP_VERBOSE` when set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = env_flag(ENV_USB)? {
            self.loader.include_usb_storage = v;
        }
        if let Some(v) = env_flag(ENV_HDD)? {
            self.loader.include_fixed_disk_storage = v;
        }
        if let Some(v) = env_flag(ENV_VERBOSE)? {
            self.loader.verbose_logging = v;
        }
        Ok(())
    }

    /// Reject a configuration whose plan needs images `registry` lacks,
    /// before the co-processor is touched.
    pub fn check_firmware(&self, registry: &FirmwareRegistry) -> Result<(), ConfigError> {
        let plan = BringUpPlan::new(&self.loader);
        let missing = plan.modules(&self.profile).find(|(_, id)| !registry.contains(*id));
        match missing {
            Some((_, id)) => Err(ConfigError::MissingFirmware { module: id.name() }),
            None => Ok(()),
        }
    }
}

fn env_flag(var: &'static str) -> Result<Option<bool>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => parse_flag(&value)
            .map(Some)
            .ok_or(ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
