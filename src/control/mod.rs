// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Polled State Machines
//!
//! Each component here advances only when the control loop calls it, and every entry point
//! except [`RangeScanner::take_reading`] returns without waiting on hardware.
//!
//! ## Modules
//!
//! - [`range_scanner`] - Timed servo sweep plus blocking ultrasonic reading.
//! - [`tick_counter`] - Hysteresis-filtered wheel stripe counter.

pub mod range_scanner;
pub mod tick_counter;

pub use range_scanner::{RangeScanner, ScannerStatus};
pub use tick_counter::{Color, CounterStatus, TickCounter};
