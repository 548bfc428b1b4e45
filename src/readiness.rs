// CLASSIFICATION: COMMUNITY
// Filename: readiness.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Bounded device-readiness polling and the delay primitives it uses.

use std::time::Duration;

use crate::coprocessor::DeviceProbe;

/// Settling delay required by the USB mass-storage driver before its
/// device can be queried at all.
pub const SETTLE_UNITS: u32 = 5;
/// Maximum number of status queries.
pub const READINESS_ATTEMPTS: u32 = 50;
/// Mount point of the first USB mass-storage device.
pub const USB_MOUNT_PATH: &str = "mass:/";
/// Spin iterations per delay unit on the reference clock.
pub const SPIN_CYCLES_PER_UNIT: u32 = 0x0100_0000;

/// Injectable delay primitive.
pub trait Delay {
    /// Block for `units` calibrated delay units.
    fn calibrated_delay(&mut self, units: u32);

    /// Lightweight pause between consecutive polls.
    fn relax(&mut self) {}
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn calibrated_delay(&mut self, units: u32) {
        (**self).calibrated_delay(units)
    }

    fn relax(&mut self) {
        (**self).relax()
    }
}

/// Busy-wait delay calibrated in spin iterations per unit.
#[derive(Debug, Clone, Copy)]
pub struct SpinDelay {
    cycles_per_unit: u32,
}

impl SpinDelay {
    pub const fn new(cycles_per_unit: u32) -> Self {
        Self { cycles_per_unit }
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new(SPIN_CYCLES_PER_UNIT)
    }
}

impl Delay for SpinDelay {
    fn calibrated_delay(&mut self, units: u32) {
        for _ in 0..units {
            for _ in 0..self.cycles_per_unit {
                core::hint::spin_loop();
            }
        }
    }

    fn relax(&mut self) {
        for _ in 0..64 {
            core::hint::spin_loop();
        }
    }
}

/// Wall-clock delay for hosted platforms.
#[derive(Debug, Clone, Copy)]
pub struct DurationDelay {
    per_unit: Duration,
}

impl DurationDelay {
    pub const fn new(per_unit: Duration) -> Self {
        Self { per_unit }
    }
}

impl Delay for DurationDelay {
    fn calibrated_delay(&mut self, units: u32) {
        std::thread::sleep(self.per_unit * units);
    }

    fn relax(&mut self) {
        std::thread::yield_now();
    }
}

/// Delay that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn calibrated_delay(&mut self, _units: u32) {}
}

/// Waits for a freshly mounted device to answer status queries.
#[derive(Debug)]
pub struct ReadinessPoller<D> {
    delay: D,
    attempts: u32,
}

impl<D: Delay> ReadinessPoller<D> {
    pub fn new(delay: D) -> Self {
        Self {
            delay,
            attempts: READINESS_ATTEMPTS,
        }
    }

    /// Override the attempt bound.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn calibrated_delay(&mut self, units: u32) {
        self.delay.calibrated_delay(units);
    }

    /// One settling delay, then up to the attempt bound of status queries.
    /// Returns whether the device answered with status `0`.
    pub fn wait_for_device<P: DeviceProbe + ?Sized>(&mut self, probe: &mut P, mount_path: &str) -> bool {
        self.delay.calibrated_delay(SETTLE_UNITS);

        for _ in 0..self.attempts {
            if probe.stat(mount_path) == 0 {
                return true;
            }
            self.delay.relax();
        }
        false
    }

    pub fn into_inner(self) -> D {
        self.delay
    }
}
