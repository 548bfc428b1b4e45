// CLASSIFICATION: COMMUNITY
// Filename: readiness_bound.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

use std::sync::Arc;
use std::time::{Duration, Instant};

use iop_bringup::readiness::{READINESS_ATTEMPTS, SETTLE_UNITS, USB_MOUNT_PATH};
use iop_bringup::sim::{synthetic_registry, SimEvent, SimulatedCoprocessor};
use iop_bringup::{
    BringUpOrchestrator, BringUpState, BuildProfile, Delay, DurationDelay, LoaderConfig,
    ReadinessPoller,
};

#[derive(Default)]
struct RecordingDelay {
    settles: Vec<u32>,
    relaxes: u32,
}

impl Delay for RecordingDelay {
    fn calibrated_delay(&mut self, units: u32) {
        self.settles.push(units);
    }

    fn relax(&mut self) {
        self.relaxes += 1;
    }
}

#[test]
fn absent_device_gives_up_after_bound() {
    let mut sim = SimulatedCoprocessor::new().with_ready_after(None);
    let mut poller = ReadinessPoller::new(RecordingDelay::default());

    assert!(!poller.wait_for_device(&mut sim, USB_MOUNT_PATH));
    assert_eq!(sim.stat_calls(), READINESS_ATTEMPTS);
    assert!(sim
        .journal()
        .iter()
        .all(|e| *e == SimEvent::Stat(USB_MOUNT_PATH.to_string())));

    let delay = poller.into_inner();
    assert_eq!(delay.settles, vec![SETTLE_UNITS]);
    assert_eq!(delay.relaxes, READINESS_ATTEMPTS);
}

#[test]
fn ready_device_answers_first_query() {
    let mut sim = SimulatedCoprocessor::new();
    let mut poller = ReadinessPoller::new(RecordingDelay::default());
    assert!(poller.wait_for_device(&mut sim, USB_MOUNT_PATH));
    assert_eq!(sim.stat_calls(), 1);
}

#[test]
fn custom_bound_is_honoured() {
    let mut sim = SimulatedCoprocessor::new().with_ready_after(Some(10));
    let mut poller = ReadinessPoller::new(RecordingDelay::default()).with_attempts(4);
    assert!(!poller.wait_for_device(&mut sim, USB_MOUNT_PATH));
    assert_eq!(sim.stat_calls(), 4);
}

#[test]
fn orchestrator_proceeds_when_usb_never_ready() {
    let mut orch = BringUpOrchestrator::with_state(
        SimulatedCoprocessor::new().with_ready_after(None),
        RecordingDelay::default(),
        synthetic_registry(),
        BuildProfile::default(),
        Arc::new(BringUpState::new()),
    );
    let report = orch
        .bring_up(LoaderConfig {
            include_usb_storage: true,
            ..LoaderConfig::default()
        })
        .unwrap();

    assert_eq!(report.usb_ready, Some(false));
    assert!(orch.state().is_loaded());
    assert_eq!(orch.platform().stat_calls(), READINESS_ATTEMPTS);
    assert_eq!(report.loaded.last(), Some(&"audsrv_irx"));
}

#[test]
fn duration_delay_sleeps_per_unit() {
    let mut delay = DurationDelay::new(Duration::from_millis(2));
    let start = Instant::now();
    delay.calibrated_delay(3);
    assert!(start.elapsed() >= Duration::from_millis(6));
}
