// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Angle-commanded actuator (hobby servo).

/// A servo that accepts an angle command in degrees.
///
/// For positional servos the angle is a shaft position. For continuous-rotation servos it
/// encodes speed and direction, with 90 as neutral.
pub trait AngleActuator {
    /// Command the actuator to `degrees` (0..=180).
    fn write(&mut self, degrees: u8);

    /// Last commanded angle.
    fn read(&self) -> u8;
}

impl<T: AngleActuator + ?Sized> AngleActuator for &mut T {
    #[inline]
    fn write(&mut self, degrees: u8) {
        (**self).write(degrees)
    }

    #[inline]
    fn read(&self) -> u8 {
        (**self).read()
    }
}
