// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Reflective wheel encoder.
//!
//! An IR reflectance sensor looks at a wheel painted with alternating black and white segments.
//! Each confirmed color change is one tick; `resolution` ticks make one counting cycle (e.g. one
//! full wheel turn).
//!
//! Readings are classified with hysteresis: the color only flips to white once the reading drops
//! below the low threshold, and only flips back to black once it reaches the high threshold.
//! Anything in between is ignored, so sensor noise near a stripe edge cannot produce extra ticks.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! encoder.run();
//!
//! loop {
//!     encoder.on_tick();
//!     if encoder.poll() == CounterStatus::Idle {
//!         // one cycle (resolution ticks) done
//!     }
//! }
//! ```

use core::f32::consts::PI;

use crate::config::{EncoderConfig, Hysteresis};
use crate::error::Result;

/// Encoder state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterStatus {
    Idle,
    Counting,
}

/// Last classified stripe color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Black,
    White,
}

/// Tick counter for one wheel.
///
/// `Read` returns the raw ADC reading of the reflectance sensor.
pub struct TickCounter<Read> {
    read: Read,
    config: EncoderConfig,

    status: CounterStatus,
    ticks: u16,
    color: Color,
}

impl<Read> TickCounter<Read>
where
    Read: FnMut() -> u16,
{
    pub fn new(config: EncoderConfig, read: Read) -> Result<Self> {
        config.validate()?;
        info!(
            "encoder: r={} cm, {=u16} ticks/cycle, band {=u16}..{=u16}",
            config.radius_cm,
            config.resolution,
            config.thresholds.low(),
            config.thresholds.high()
        );

        Ok(Self {
            read,
            config,
            status: CounterStatus::Idle,
            ticks: 0,
            color: Color::Black,
        })
    }

    /// Start a counting cycle.
    ///
    /// Does nothing if a cycle is already running, so it is safe to call every iteration.
    pub fn run(&mut self) {
        if self.status == CounterStatus::Counting {
            return;
        }
        self.ticks = 0;
        self.status = CounterStatus::Counting;
        self.color = if (self.read)() < self.config.thresholds.low() {
            Color::Black
        } else {
            Color::White
        };
        debug!("encoder: counting, seeded {}", self.color);
    }

    /// Sample the sensor once and count a tick on a confirmed color change.
    ///
    /// Once the cycle is full, further samples are ignored until `poll` consumes it.
    pub fn on_tick(&mut self) {
        if self.status == CounterStatus::Idle || self.ticks >= self.config.resolution {
            return;
        }

        let value = (self.read)();
        let band = &self.config.thresholds;
        let next = match self.color {
            Color::Black if value < band.low() => Color::White,
            Color::White if value >= band.high() => Color::Black,
            _ => return,
        };

        self.color = next;
        self.ticks += 1;
        trace!("encoder: tick {=u16} ({})", self.ticks, next);
    }

    /// Stop counting and discard any partial cycle.
    pub fn sleep(&mut self) {
        self.status = CounterStatus::Idle;
        self.ticks = 0;
    }

    /// Consume a completed cycle, if any, and return the current status.
    pub fn poll(&mut self) -> CounterStatus {
        if self.status == CounterStatus::Counting && self.ticks == self.config.resolution {
            self.status = CounterStatus::Idle;
            self.ticks = 0;
            debug!("encoder: cycle complete");
        }
        self.status
    }

    #[inline]
    pub fn status(&self) -> CounterStatus {
        self.status
    }

    /// Ticks counted in the current cycle.
    #[inline]
    pub fn ticks(&self) -> u16 {
        self.ticks
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn resolution(&self) -> u16 {
        self.config.resolution
    }

    #[inline]
    pub fn thresholds(&self) -> &Hysteresis {
        &self.config.thresholds
    }

    #[inline]
    pub fn radius_cm(&self) -> f32 {
        self.config.radius_cm
    }

    /// Wheel circumference in centimeters.
    pub fn circumference_cm(&self) -> f32 {
        2.0 * PI * self.config.radius_cm
    }

    /// Arc length of wheel travel per tick.
    pub fn distance_per_tick_cm(&self) -> f32 {
        self.circumference_cm() / self.config.resolution as f32
    }

    /// Distance covered by the ticks counted so far in this cycle.
    pub fn distance_cm(&self) -> f32 {
        self.ticks as f32 * self.distance_per_tick_cm()
    }

    pub fn free(self) -> Read {
        self.read
    }
}
