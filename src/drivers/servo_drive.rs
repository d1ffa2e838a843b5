// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Differential drive built from two continuous-rotation servos.
//!
//! The drive holds no motion state: every call maps a named intent to one fixed pair of angle
//! commands from [`DriveAngles`] and writes it out.

use crate::config::{DriveAngles, WheelAngles};
use crate::io::AngleActuator;

/// Logical drive intent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motion {
    Forward,
    Reverse,
    TurnLeft,
    TurnRight,
    Stop,
}

/// Left/right servo pair.
pub struct ServoDrive<L, R> {
    left: L,
    right: R,
    angles: DriveAngles,
}

impl<L, R> ServoDrive<L, R>
where
    L: AngleActuator,
    R: AngleActuator,
{
    pub fn new(left: L, right: R, angles: DriveAngles) -> Self {
        Self {
            left,
            right,
            angles,
        }
    }

    /// Issue the command pair for `motion`.
    pub fn apply(&mut self, motion: Motion) {
        let cmd = self.command_for(motion);
        trace!(
            "drive {} -> L {=u8} R {=u8}",
            motion,
            cmd.left,
            cmd.right
        );
        // Right first, matching the wiring order of the stock harness.
        self.right.write(cmd.right);
        self.left.write(cmd.left);
    }

    /// Angle pair that `motion` maps to.
    pub fn command_for(&self, motion: Motion) -> WheelAngles {
        match motion {
            Motion::Forward => self.angles.forward,
            Motion::Reverse => self.angles.reverse,
            Motion::TurnLeft => self.angles.turn_left,
            Motion::TurnRight => self.angles.turn_right,
            Motion::Stop => self.angles.stop,
        }
    }

    #[inline]
    pub fn forward(&mut self) {
        self.apply(Motion::Forward);
    }

    #[inline]
    pub fn reverse(&mut self) {
        self.apply(Motion::Reverse);
    }

    /// Spin in place to the left.
    #[inline]
    pub fn turn_left(&mut self) {
        self.apply(Motion::TurnLeft);
    }

    /// Spin in place to the right.
    #[inline]
    pub fn turn_right(&mut self) {
        self.apply(Motion::TurnRight);
    }

    #[inline]
    pub fn stop(&mut self) {
        self.apply(Motion::Stop);
    }

    pub fn angles(&self) -> &DriveAngles {
        &self.angles
    }

    pub fn free(self) -> (L, R) {
        (self.left, self.right)
    }
}
