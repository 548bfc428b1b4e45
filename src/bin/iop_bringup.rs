// CLASSIFICATION: COMMUNITY
// Filename: iop_bringup.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Run the bring-up sequence against the host simulator.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use iop_bringup::firmware::measure::image_digest;
use iop_bringup::sim::{synthetic_registry, SimulatedCoprocessor};
use iop_bringup::{
    BootConfig, BringUpOrchestrator, BringUpPlan, BringUpStatus, DurationDelay, FirmwareRegistry,
};

#[derive(Parser)]
#[command(about = "Sequence I/O co-processor firmware bring-up")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Load the USB storage group
    #[arg(long)]
    usb: bool,
    /// Load the fixed-disk storage group
    #[arg(long)]
    hdd: bool,
    /// Log every module load
    #[arg(long)]
    verbose: bool,
    /// Print the ordered module list and exit
    #[arg(long)]
    plan: bool,
    /// Directory of <module>.irx images (placeholders when omitted)
    #[arg(long)]
    firmware_dir: Option<PathBuf>,
    /// Simulate a load failure for this module
    #[arg(long)]
    fail_module: Option<String>,
    /// Simulated USB device answers from this status query on (0: never)
    #[arg(long)]
    ready_after: Option<u32>,
    /// Milliseconds per settling delay unit
    #[arg(long, default_value_t = 10)]
    settle_ms: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match BootConfig::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(2);
            }
        },
        None => BootConfig::default(),
    };
    if let Err(err) = config.apply_env_overrides() {
        eprintln!("Error: {err}");
        std::process::exit(2);
    }
    config.loader.include_usb_storage |= args.usb;
    config.loader.include_fixed_disk_storage |= args.hdd;
    config.loader.verbose_logging |= args.verbose;

    let registry = match &args.firmware_dir {
        Some(dir) => match FirmwareRegistry::load_dir(dir) {
            Ok(r) => r,
            Err(err) => {
                eprintln!("Error: {}: {err}", dir.display());
                std::process::exit(2);
            }
        },
        None => synthetic_registry(),
    };

    if args.plan {
        let plan = BringUpPlan::new(&config.loader);
        for (group, id) in plan.modules(&config.profile) {
            let digest = registry
                .module(id)
                .map(|m| image_digest(&m)[..16].to_string())
                .unwrap_or_else(|_| "missing".into());
            println!("{:<12} {:<20} {digest}", group.name(), id.name());
        }
        return;
    }

    if let Err(err) = config.check_firmware(&registry) {
        eprintln!("Error: {err}");
        std::process::exit(2);
    }

    let ready_after = match args.ready_after {
        Some(0) => None,
        Some(n) => Some(n),
        None => Some(1),
    };
    let mut sim = SimulatedCoprocessor::new().with_ready_after(ready_after);
    if let Some(name) = &args.fail_module {
        sim = sim.with_failing_module(name, -1);
    }

    let delay = DurationDelay::new(Duration::from_millis(args.settle_ms));
    let mut orch = BringUpOrchestrator::new(sim, delay, registry, config.profile);
    let report = orch.bring_up_or_terminate(config.loader);

    if report.status == BringUpStatus::Completed {
        println!("loaded {} modules", report.loaded.len());
        if let Some(ready) = report.usb_ready {
            println!("usb storage ready: {ready}");
        }
        println!("measurement {}", report.measurement_hex());
    }
}
