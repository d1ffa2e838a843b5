// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Parallax PING))) ultrasonic distance sensor.
//!
//! One measurement:
//! - drive SIG low for 2 µs to get a clean edge
//! - drive SIG high for 5 µs (trigger pulse, tOUT)
//! - release SIG and time the high echo pulse
//!
//! Sound travels roughly 29 µs per centimeter, and the echo covers the distance twice.
//!
//! This is the only blocking operation in the crate: [`PingSensor::measure_us`] busy-waits for
//! the echo for up to the configured timeout.

use embedded_hal::delay::DelayNs;

use crate::io::{PinMode, PinState, PingPin};

/// Microseconds for sound to travel one centimeter.
pub const MICROS_PER_CM: u32 = 29;

/// Settle time before the trigger pulse.
const PRE_TRIGGER_LOW_US: u32 = 2;

/// Trigger pulse width.
const TRIGGER_HIGH_US: u32 = 5;

/// Convert a round-trip echo time to a one-way distance in centimeters.
#[inline]
pub fn micros_to_cm(round_trip_us: u32) -> u32 {
    round_trip_us / MICROS_PER_CM / 2
}

/// Driver for a single-wire ultrasonic ranger.
pub struct PingSensor<PIN, DELAY> {
    pin: PIN,
    delay: DELAY,
    echo_timeout_us: u32,
}

impl<PIN, DELAY> PingSensor<PIN, DELAY>
where
    PIN: PingPin,
    DELAY: DelayNs,
{
    pub fn new(pin: PIN, delay: DELAY, echo_timeout_us: u32) -> Self {
        Self {
            pin,
            delay,
            echo_timeout_us,
        }
    }

    /// Trigger one ping and return the echo pulse width in microseconds.
    ///
    /// Returns 0 when no echo arrives before the timeout.
    pub fn measure_us(&mut self) -> u32 {
        self.pin.set_mode(PinMode::Output);
        self.pin.set_level(PinState::Low);
        self.delay.delay_us(PRE_TRIGGER_LOW_US);
        self.pin.set_level(PinState::High);
        self.delay.delay_us(TRIGGER_HIGH_US);
        self.pin.set_level(PinState::Low);

        self.pin.set_mode(PinMode::Input);
        let echo_us = self.pin.measure_pulse(PinState::High, self.echo_timeout_us);
        trace!("ping echo {=u32} us", echo_us);
        echo_us
    }

    /// Trigger one ping and return the distance in centimeters.
    ///
    /// A missed echo reads as 0 cm, the same as an object touching the sensor. Callers that
    /// care must treat 0 as "no echo".
    pub fn measure_cm(&mut self) -> u32 {
        let echo_us = self.measure_us();
        if echo_us == 0 {
            warn!("ping: no echo within {=u32} us", self.echo_timeout_us);
        }
        micros_to_cm(echo_us)
    }

    #[inline]
    pub fn echo_timeout_us(&self) -> u32 {
        self.echo_timeout_us
    }

    /// Release the pin and delay provider.
    pub fn free(self) -> (PIN, DELAY) {
        (self.pin, self.delay)
    }
}
