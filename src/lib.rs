// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Betelbot Peripheral Core
//!
//! Non-blocking control for the Betelbot's onboard peripherals: a servo-swept ultrasonic
//! ranger, a two-servo differential drive, and a reflective encoder on each wheel. One
//! cooperative loop polls every component once per iteration; apart from the ultrasonic reading
//! itself, nothing waits on hardware.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`io`] | Hardware capability traits consumed by the core |
//! | [`drivers`] | Device-level drivers (PING))) ranger, servo drive) |
//! | [`control`] | Polled state machines (range scanner, tick counter) |
//! | [`config`] | Named tuning constants and their validation |
//! | `hw` | STM32F777 board support (feature `stm32f7`) |
//!
//! ## Features
//!
//! - `stm32f7`: board support in `hw` and the `betelbot` firmware binary
//! - `defmt`: log state transitions through `defmt`
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features stm32f7 --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod io;

#[cfg(feature = "stm32f7")]
pub mod hw;

pub use config::{DriveAngles, EncoderConfig, Hysteresis, ScanAngles, ScannerConfig};
pub use control::{Color, CounterStatus, RangeScanner, ScannerStatus, TickCounter};
pub use drivers::{Motion, PingSensor, ServoDrive};
pub use error::{Error, Result};
