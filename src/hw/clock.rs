// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Time sources: a SysTick millisecond counter and a cycle-counted microsecond delay.
//!
//! SysTick is dedicated to the millisecond clock, so short delays are busy-waited with
//! `cortex_m::asm::delay` instead of `cortex_m::delay::Delay`. The firmware must forward the
//! SysTick exception:
//!
//! ```ignore
//! #[exception]
//! fn SysTick() {
//!     SysTickClock::on_tick();
//! }
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::{syst::SystClkSource, SYST};
use embedded_hal::delay::DelayNs;

use crate::io::Clock;

static MILLIS: AtomicU32 = AtomicU32::new(0);

/// Handle to the free-running millisecond counter.
#[derive(Copy, Clone, Debug)]
pub struct SysTickClock {
    _private: (),
}

impl SysTickClock {
    /// Start SysTick with a 1 ms period.
    pub fn start(mut syst: SYST, sysclk_hz: u32) -> Self {
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(sysclk_hz / 1_000 - 1);
        syst.clear_current();
        syst.enable_counter();
        syst.enable_interrupt();
        Self { _private: () }
    }

    /// Advance the counter; call from the SysTick exception handler.
    #[inline]
    pub fn on_tick() {
        MILLIS.fetch_add(1, Ordering::Relaxed);
    }
}

impl Clock for SysTickClock {
    #[inline]
    fn now_ms(&self) -> u32 {
        MILLIS.load(Ordering::Relaxed)
    }
}

/// Busy-wait delay calibrated to the core clock.
#[derive(Copy, Clone, Debug)]
pub struct CycleDelay {
    sysclk_hz: u32,
}

impl CycleDelay {
    pub fn new(sysclk_hz: u32) -> Self {
        Self { sysclk_hz }
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (ns as u64 * self.sysclk_hz as u64).div_ceil(1_000_000_000);
        cortex_m::asm::delay(cycles.min(u32::MAX as u64) as u32);
    }
}
