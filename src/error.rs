// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Configuration errors.
//!
//! Runtime operations on the scanner, drive and encoders cannot fail; only building their
//! configuration can.

use thiserror::Error;

/// Rejected configuration value.
#[derive(Copy, Clone, Debug, Error, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The black threshold sits above the white threshold, so the dead band is empty.
    #[error("hysteresis low threshold {low} is above high threshold {high}")]
    InvertedThresholds { low: u16, high: u16 },

    /// An encoder cycle must contain at least one tick.
    #[error("encoder resolution must be non-zero")]
    ZeroResolution,

    /// Wheel radius must be a positive, finite length.
    #[error("wheel radius must be positive and finite")]
    InvalidRadius,

    /// A sweep has to take some time to complete.
    #[error("sweep delay must be non-zero")]
    ZeroSweepDelay,

    /// A zero echo timeout would make every reading a miss.
    #[error("echo timeout must be non-zero")]
    ZeroEchoTimeout,

    /// A reference angle is outside the servo range.
    #[error("scan angle {0} is outside 0..=180 degrees")]
    AngleOutOfRange(u8),

    /// Reference angles must satisfy `right < forward < left`.
    #[error("scan angles must be ordered right < forward < left")]
    UnorderedScanAngles,
}

pub type Result<T> = core::result::Result<T, Error>;
