// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-level drivers that sit on top of the capability traits in `io`
//! and below the control state machines.
//!
//! ## Existing drivers
//!
//! - [`ping`] – Parallax PING))) single-wire ultrasonic ranger
//! - [`servo_drive`] – Differential drive on two continuous-rotation servos

pub mod ping;
pub mod servo_drive;

pub use ping::PingSensor;
pub use servo_drive::{Motion, ServoDrive};
