// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Signal pin for a PING-style ultrasonic ranger.
//!
//! The Parallax PING))) shares one line for trigger and echo: the controller drives a short
//! high pulse, then releases the line and the sensor answers with a high pulse whose width is
//! the round-trip time of flight. Boards with separate trigger/echo lines (HC-SR04) implement
//! the same trait by routing writes to one pin and reads to the other.

use embedded_hal::digital::PinState;

/// Direction of the signal line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Output,
    Input,
}

pub trait PingPin {
    fn set_mode(&mut self, mode: PinMode);

    /// Drive the line. Only meaningful in [`PinMode::Output`].
    fn set_level(&mut self, level: PinState);

    /// Current level of the line as seen by the controller.
    fn level(&mut self) -> PinState;

    /// Wait for a pulse at `level` and return its width in microseconds.
    ///
    /// Returns 0 if no complete pulse is seen within `timeout_us`.
    fn measure_pulse(&mut self, level: PinState, timeout_us: u32) -> u32;
}
