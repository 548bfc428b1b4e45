// CLASSIFICATION: COMMUNITY
// Filename: boot_config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

use std::env;
use std::fs;

use iop_bringup::config::{ENV_HDD, ENV_USB, ENV_VERBOSE};
use iop_bringup::{BootConfig, BringUpPlan, ConfigError, ModuleGroup, UsbDriverSet};
use serial_test::serial;
use tempfile::tempdir;

struct EnvGuard(Vec<(&'static str, Option<String>)>);

impl EnvGuard {
    fn clear() -> Self {
        let saved = [ENV_USB, ENV_HDD, ENV_VERBOSE]
            .into_iter()
            .map(|k| (k, env::var(k).ok()))
            .collect();
        for k in [ENV_USB, ENV_HDD, ENV_VERBOSE] {
            env::remove_var(k);
        }
        EnvGuard(saved)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (k, v) in &self.0 {
            match v {
                Some(v) => env::set_var(k, v),
                None => env::remove_var(k),
            }
        }
    }
}

#[test]
#[serial]
fn load_file_and_build_plan() {
    let _env = EnvGuard::clear();
    let dir = tempdir().unwrap();
    let path = dir.path().join("iop.toml");
    fs::write(
        &path,
        "[loader]\ninclude_usb_storage = true\n\n[profile]\nusb_driver = \"minimal\"\n",
    )
    .unwrap();

    let mut cfg = BootConfig::load(&path).unwrap();
    cfg.apply_env_overrides().unwrap();
    assert!(cfg.loader.include_usb_storage);
    assert_eq!(cfg.profile.usb_driver, UsbDriverSet::Minimal);

    let plan = BringUpPlan::new(&cfg.loader);
    assert_eq!(
        plan.groups(),
        &[
            ModuleGroup::CoreIo,
            ModuleGroup::Input,
            ModuleGroup::UsbStorage,
            ModuleGroup::Audio
        ]
    );
}

#[test]
#[serial]
fn env_overrides_file_values() {
    let _env = EnvGuard::clear();
    let mut cfg = BootConfig::parse("[loader]\ninclude_usb_storage = true\n").unwrap();
    env::set_var(ENV_USB, "off");
    env::set_var(ENV_HDD, "1");
    env::set_var(ENV_VERBOSE, "yes");
    cfg.apply_env_overrides().unwrap();
    assert!(!cfg.loader.include_usb_storage);
    assert!(cfg.loader.include_fixed_disk_storage);
    assert!(cfg.loader.verbose_logging);
}

#[test]
#[serial]
fn bad_env_value_is_rejected() {
    let _env = EnvGuard::clear();
    env::set_var(ENV_HDD, "sometimes");
    let mut cfg = BootConfig::default();
    let err = cfg.apply_env_overrides().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnv { var, .. } if var == ENV_HDD));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = BootConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.toml"));
}
