// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Capabilities
//!
//! Narrow interfaces the control core consumes. Board support (see `hw`, feature `stm32f7`)
//! implements them for real peripherals; tests implement them with fakes.
//!
//! | Capability | Interface |
//! | ---------- | --------- |
//! | Servo angle command | [`AngleActuator`] |
//! | Single-wire ranger pin | [`PingPin`] |
//! | Millisecond clock | [`Clock`] |
//! | Microsecond delay | [`embedded_hal::delay::DelayNs`] |
//! | Analog input | any `FnMut() -> u16`, e.g. `hw::Adc::make_reader` |

pub mod actuator;
pub mod clock;
pub mod ping;

pub use actuator::AngleActuator;
pub use clock::Clock;
pub use ping::{PinMode, PingPin};

pub use embedded_hal::digital::PinState;
