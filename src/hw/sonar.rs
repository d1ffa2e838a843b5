// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Ultrasonic ranger on two GPIOs, timed with the DWT cycle counter.
//!
//! The board routes trigger and echo to separate pins, so `set_mode` has nothing to switch.
//! The DWT cycle counter must be enabled before use:
//!
//! ```ignore
//! cp.DCB.enable_trace();
//! cp.DWT.enable_cycle_counter();
//! ```

use cortex_m::peripheral::DWT;
use stm32f7xx_hal::gpio::{self, Floating, Input, Output, PushPull};

use crate::io::{PinMode, PinState, PingPin};

pub struct Sonar<const TP: char, const TN: u8, const EP: char, const EN: u8> {
    trig: gpio::Pin<TP, TN, Output<PushPull>>,
    echo: gpio::Pin<EP, EN, Input<Floating>>,
    cycles_per_us: u32,
}

impl<const TP: char, const TN: u8, const EP: char, const EN: u8> Sonar<TP, TN, EP, EN> {
    /// `sysclk_hz` is the core clock, which the DWT counter runs at.
    pub fn new(
        trig: gpio::Pin<TP, TN, Output<PushPull>>,
        echo: gpio::Pin<EP, EN, Input<Floating>>,
        sysclk_hz: u32,
    ) -> Self {
        Self {
            trig,
            echo,
            cycles_per_us: (sysclk_hz / 1_000_000).max(1),
        }
    }

    pub fn free(
        self,
    ) -> (
        gpio::Pin<TP, TN, Output<PushPull>>,
        gpio::Pin<EP, EN, Input<Floating>>,
    ) {
        (self.trig, self.echo)
    }
}

impl<const TP: char, const TN: u8, const EP: char, const EN: u8> PingPin
    for Sonar<TP, TN, EP, EN>
{
    fn set_mode(&mut self, _mode: PinMode) {}

    fn set_level(&mut self, level: PinState) {
        match level {
            PinState::High => self.trig.set_high(),
            PinState::Low => self.trig.set_low(),
        }
    }

    fn level(&mut self) -> PinState {
        PinState::from(self.echo.is_high())
    }

    fn measure_pulse(&mut self, level: PinState, timeout_us: u32) -> u32 {
        let active = level == PinState::High;
        let budget = timeout_us.saturating_mul(self.cycles_per_us);
        let start = DWT::cycle_count();
        let expired = || DWT::cycle_count().wrapping_sub(start) >= budget;

        // Let any pulse already in progress finish.
        while self.echo.is_high() == active {
            if expired() {
                return 0;
            }
        }

        // Wait for the leading edge.
        while self.echo.is_high() != active {
            if expired() {
                return 0;
            }
        }
        let leading = DWT::cycle_count();

        // Wait for the trailing edge.
        while self.echo.is_high() == active {
            if expired() {
                return 0;
            }
        }

        DWT::cycle_count().wrapping_sub(leading) / self.cycles_per_us
    }
}
