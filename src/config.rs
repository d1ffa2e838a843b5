// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Tunable constants for the scanner, drive and wheel encoders.
//!
//! Every value here is tied to a mechanical assumption about one physical robot (servo sweep
//! speed, servo trim, reflectance of the wheel stripes), so each lives in a named config struct
//! whose `Default` matches the stock Betelbot build. Override per unit with the `with_*`
//! builders and check the result with `validate()`.

use crate::error::{Error, Result};

/// Largest angle a hobby servo accepts.
pub const MAX_ANGLE: u8 = 180;

/// Neutral command for a continuous-rotation servo (no motion).
pub const NEUTRAL_ANGLE: u8 = 90;

/// Arduino `pulseIn` default: wait up to one second for the echo.
pub const DEFAULT_ECHO_TIMEOUT_US: u32 = 1_000_000;

/// Canonical scanner mount angles, in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanAngles {
    pub left: u8,
    /// Forward reference; sweeps that cross it take twice as long.
    pub forward: u8,
    pub right: u8,
}

impl Default for ScanAngles {
    fn default() -> Self {
        Self {
            left: 180,
            forward: 90,
            right: 0,
        }
    }
}

impl ScanAngles {
    pub fn validate(&self) -> Result<()> {
        for angle in [self.left, self.forward, self.right] {
            if angle > MAX_ANGLE {
                return Err(Error::AngleOutOfRange(angle));
            }
        }
        if !(self.right < self.forward && self.forward < self.left) {
            return Err(Error::UnorderedScanAngles);
        }
        Ok(())
    }

    /// Returns true if moving from `from` to `to` passes over the forward angle.
    ///
    /// Either end sitting exactly on the forward angle does not count as a crossing.
    #[inline]
    pub fn crosses_forward(&self, from: u8, to: u8) -> bool {
        (to > self.forward && from < self.forward) || (to < self.forward && from > self.forward)
    }
}

/// Range scanner timing and geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScannerConfig {
    /// Time (ms) for the mount to settle after a sweep that stays on one side of forward.
    pub sweep_delay_ms: u32,
    /// How long a reading may wait for the echo before giving up.
    pub echo_timeout_us: u32,
    pub angles: ScanAngles,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            sweep_delay_ms: 300,
            echo_timeout_us: DEFAULT_ECHO_TIMEOUT_US,
            angles: ScanAngles::default(),
        }
    }
}

impl ScannerConfig {
    /// Scanner config with the given single-step sweep delay and default everything else.
    pub fn new(sweep_delay_ms: u32) -> Self {
        Self {
            sweep_delay_ms,
            ..Self::default()
        }
    }

    pub fn with_echo_timeout_us(mut self, timeout_us: u32) -> Self {
        self.echo_timeout_us = timeout_us;
        self
    }

    pub fn with_angles(mut self, angles: ScanAngles) -> Self {
        self.angles = angles;
        self
    }

    /// Settle time for a sweep that crosses the forward angle.
    #[inline]
    pub fn double_sweep_delay_ms(&self) -> u32 {
        self.sweep_delay_ms.saturating_mul(2)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sweep_delay_ms == 0 {
            return Err(Error::ZeroSweepDelay);
        }
        if self.echo_timeout_us == 0 {
            return Err(Error::ZeroEchoTimeout);
        }
        self.angles.validate()
    }
}

/// Left/right servo command pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelAngles {
    pub left: u8,
    pub right: u8,
}

impl WheelAngles {
    pub const fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }
}

/// Servo commands for each drive intent.
///
/// The servos are mounted mirrored, so driving straight means opposite commands on each side.
/// The stock forward command for the left wheel is trimmed to 65 to keep the robot tracking
/// straight.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveAngles {
    pub forward: WheelAngles,
    pub reverse: WheelAngles,
    pub turn_left: WheelAngles,
    pub turn_right: WheelAngles,
    pub stop: WheelAngles,
}

impl Default for DriveAngles {
    fn default() -> Self {
        Self {
            forward: WheelAngles::new(65, 180),
            reverse: WheelAngles::new(180, 0),
            turn_left: WheelAngles::new(180, 180),
            turn_right: WheelAngles::new(0, 0),
            stop: WheelAngles::new(NEUTRAL_ANGLE, NEUTRAL_ANGLE),
        }
    }
}

impl DriveAngles {
    pub fn with_forward(mut self, left: u8, right: u8) -> Self {
        self.forward = WheelAngles::new(left, right);
        self
    }

    pub fn with_reverse(mut self, left: u8, right: u8) -> Self {
        self.reverse = WheelAngles::new(left, right);
        self
    }

    pub fn with_stop(mut self, left: u8, right: u8) -> Self {
        self.stop = WheelAngles::new(left, right);
        self
    }
}

/// Dead band for classifying the reflectance sensor.
///
/// A black classification only changes on a reading below `low`, a white one only on a reading
/// at or above `high`. Readings in between leave the classification alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hysteresis {
    low: u16,
    high: u16,
}

impl Hysteresis {
    pub fn new(low: u16, high: u16) -> Result<Self> {
        if low > high {
            return Err(Error::InvertedThresholds { low, high });
        }
        Ok(Self { low, high })
    }

    #[inline]
    pub fn low(&self) -> u16 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> u16 {
        self.high
    }

    /// Width of the dead band in raw ADC counts.
    #[inline]
    pub fn width(&self) -> u16 {
        self.high - self.low
    }
}

/// Geometry and thresholds for one wheel encoder.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    /// Wheel radius in centimeters.
    pub radius_cm: f32,
    /// Ticks in one complete counting cycle.
    pub resolution: u16,
    pub thresholds: Hysteresis,
}

impl EncoderConfig {
    pub fn new(radius_cm: f32, resolution: u16, thresholds: Hysteresis) -> Result<Self> {
        let config = Self {
            radius_cm,
            resolution,
            thresholds,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(Error::ZeroResolution);
        }
        if !self.radius_cm.is_finite() || self.radius_cm <= 0.0 {
            return Err(Error::InvalidRadius);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 180, true)]
    #[case(180, 0, true)]
    #[case(45, 135, true)]
    #[case(0, 45, false)]
    #[case(135, 180, false)]
    #[case(90, 180, false)]
    #[case(0, 90, false)]
    #[case(90, 90, false)]
    fn forward_crossing(#[case] from: u8, #[case] to: u8, #[case] crosses: bool) {
        assert_eq!(ScanAngles::default().crosses_forward(from, to), crosses);
    }

    #[test]
    fn default_scanner_config_is_valid() {
        let config = ScannerConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.double_sweep_delay_ms(), 600);
    }

    #[test]
    fn scanner_config_rejects_bad_values() {
        assert_eq!(ScannerConfig::new(0).validate(), Err(Error::ZeroSweepDelay));
        assert_eq!(
            ScannerConfig::new(100).with_echo_timeout_us(0).validate(),
            Err(Error::ZeroEchoTimeout)
        );

        let reversed = ScanAngles {
            left: 0,
            forward: 90,
            right: 180,
        };
        assert_eq!(
            ScannerConfig::new(100).with_angles(reversed).validate(),
            Err(Error::UnorderedScanAngles)
        );

        let too_wide = ScanAngles {
            left: 200,
            forward: 90,
            right: 0,
        };
        assert_eq!(too_wide.validate(), Err(Error::AngleOutOfRange(200)));
    }

    #[test]
    fn hysteresis_rejects_inverted_band() {
        assert_eq!(
            Hysteresis::new(700, 300),
            Err(Error::InvertedThresholds { low: 700, high: 300 })
        );
        let band = Hysteresis::new(300, 700).unwrap();
        assert_eq!(band.width(), 400);

        // A zero-width band is allowed; it just gives no noise rejection.
        assert!(Hysteresis::new(500, 500).is_ok());
    }

    #[rstest]
    #[case(3.0, 0, Error::ZeroResolution)]
    #[case(0.0, 20, Error::InvalidRadius)]
    #[case(-1.5, 20, Error::InvalidRadius)]
    #[case(f32::NAN, 20, Error::InvalidRadius)]
    fn encoder_config_rejects(#[case] radius: f32, #[case] resolution: u16, #[case] err: Error) {
        let band = Hysteresis::new(300, 700).unwrap();
        assert_eq!(EncoderConfig::new(radius, resolution, band), Err(err));
    }

    #[test]
    fn default_drive_angles_mirror_around_neutral() {
        let angles = DriveAngles::default();
        assert!(angles.forward.left < NEUTRAL_ANGLE && angles.forward.right > NEUTRAL_ANGLE);
        assert!(angles.reverse.left > NEUTRAL_ANGLE && angles.reverse.right < NEUTRAL_ANGLE);
        assert_eq!(angles.stop, WheelAngles::new(NEUTRAL_ANGLE, NEUTRAL_ANGLE));
    }
}
