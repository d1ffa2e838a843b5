// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Servo-mounted ultrasonic range scanner.
//!
//! Pointing the sensor is non-blocking: [`RangeScanner::begin_sweep`] commands the mount and
//! returns immediately, and [`RangeScanner::poll`] reports when the mount has had enough time to
//! settle. The mount gives no position feedback, so completion is inferred from elapsed time. A
//! sweep that passes over the forward angle gets twice the settle time of one that does not.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! scanner.sweep_to_left();
//!
//! loop {
//!     if scanner.poll() == ScannerStatus::Ready {
//!         let cm = scanner.take_reading();
//!         // ...
//!     }
//!     // service other components
//! }
//! ```

use embedded_hal::delay::DelayNs;

use crate::config::ScannerConfig;
use crate::drivers::PingSensor;
use crate::error::Result;
use crate::io::{AngleActuator, Clock, PingPin};

/// Scanner state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScannerStatus {
    /// No sweep in flight.
    Idle,
    /// Mount commanded, still moving.
    Sweeping,
    /// Mount has settled; a reading can be taken.
    Ready,
}

pub struct RangeScanner<MOUNT, PIN, DELAY, CLK> {
    mount: MOUNT,
    sensor: PingSensor<PIN, DELAY>,
    clock: CLK,
    config: ScannerConfig,

    status: ScannerStatus,
    target_angle: u8,
    /// Settle time picked for the sweep in flight.
    active_delay_ms: u32,
    sweep_start_ms: u32,
}

impl<MOUNT, PIN, DELAY, CLK> RangeScanner<MOUNT, PIN, DELAY, CLK>
where
    MOUNT: AngleActuator,
    PIN: PingPin,
    DELAY: DelayNs,
    CLK: Clock,
{
    /// Bind the mount, sensor pin and clock.
    ///
    /// The double-step delay is derived as twice `config.sweep_delay_ms`.
    pub fn new(
        mount: MOUNT,
        pin: PIN,
        delay: DELAY,
        clock: CLK,
        config: ScannerConfig,
    ) -> Result<Self> {
        config.validate()?;
        info!(
            "scanner: sweep {=u32}/{=u32} ms, echo timeout {=u32} us",
            config.sweep_delay_ms,
            config.double_sweep_delay_ms(),
            config.echo_timeout_us
        );

        let target_angle = mount.read();
        Ok(Self {
            mount,
            sensor: PingSensor::new(pin, delay, config.echo_timeout_us),
            clock,
            config,
            status: ScannerStatus::Idle,
            target_angle,
            active_delay_ms: config.sweep_delay_ms,
            sweep_start_ms: 0,
        })
    }

    /// Command the mount to `angle` and start timing the sweep.
    pub fn begin_sweep(&mut self, angle: u8) {
        let current = self.mount.read();
        self.active_delay_ms = if self.config.angles.crosses_forward(current, angle) {
            self.config.double_sweep_delay_ms()
        } else {
            self.config.sweep_delay_ms
        };

        self.mount.write(angle);
        self.target_angle = angle;
        self.sweep_start_ms = self.clock.now_ms();
        self.status = ScannerStatus::Sweeping;
        debug!(
            "scanner: sweep {=u8} -> {=u8}, settle {=u32} ms",
            current,
            angle,
            self.active_delay_ms
        );
    }

    #[inline]
    pub fn sweep_to_forward(&mut self) {
        self.begin_sweep(self.config.angles.forward);
    }

    #[inline]
    pub fn sweep_to_left(&mut self) {
        self.begin_sweep(self.config.angles.left);
    }

    #[inline]
    pub fn sweep_to_right(&mut self) {
        self.begin_sweep(self.config.angles.right);
    }

    /// Abandon the sweep in flight. The mount is not commanded.
    pub fn cancel(&mut self) {
        self.status = ScannerStatus::Idle;
    }

    /// Advance the sweep timer and return the current status.
    ///
    /// Cheap and idempotent; call it every loop iteration.
    pub fn poll(&mut self) -> ScannerStatus {
        if self.status == ScannerStatus::Sweeping
            && self.clock.elapsed_ms(self.sweep_start_ms) >= self.active_delay_ms
        {
            self.status = ScannerStatus::Ready;
            debug!("scanner: settled at {=u8}", self.target_angle);
        }
        self.status
    }

    /// Take one blocking distance reading in centimeters.
    ///
    /// Always leaves the scanner Idle. Blocks for the full echo, up to
    /// `ScannerConfig::echo_timeout_us`; other components' timing drifts by that much.
    ///
    /// A missed echo is returned as 0, indistinguishable from an object at zero range. Treat 0 as
    /// "no echo".
    pub fn take_reading(&mut self) -> u32 {
        let cm = self.sensor.measure_cm();
        self.status = ScannerStatus::Idle;
        debug!("scanner: {=u32} cm at {=u8}", cm, self.target_angle);
        cm
    }

    /// Status as of the last `poll`, without advancing the timer.
    #[inline]
    pub fn status(&self) -> ScannerStatus {
        self.status
    }

    /// Last commanded mount angle.
    #[inline]
    pub fn target_angle(&self) -> u8 {
        self.target_angle
    }

    /// Settle time chosen for the current (or last) sweep.
    #[inline]
    pub fn active_sweep_delay_ms(&self) -> u32 {
        self.active_delay_ms
    }

    #[inline]
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn free(self) -> (MOUNT, PingSensor<PIN, DELAY>, CLK) {
        (self.mount, self.sensor, self.clock)
    }
}
