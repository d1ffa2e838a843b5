// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hobby-servo PWM on TIM4.
//!
//! TIM4 is configured for a 1 MHz count and a 20 ms period, so each capture/compare register
//! holds the pulse width directly in microseconds. Channels 1-3 drive the scanner mount and the
//! two wheel servos.

use stm32f7xx_hal::pac;

use crate::io::AngleActuator;

/// Servo frame period.
const PERIOD_US: u32 = 20_000;

/// Pulse widths for 0 and 180 degrees (Arduino `Servo` defaults).
const MIN_PULSE_US: u32 = 544;
const MAX_PULSE_US: u32 = 2_400;

/// Power-on command, matching the Arduino `Servo` attach default.
const INITIAL_ANGLE: u8 = 90;

// CCMRx output compare: OCxM = PWM mode 1, OCxPE = preload enable.
const OC_PWM1_PRELOAD: u32 = (0b110 << 4) | (1 << 3);

/// Pulse width in microseconds for `degrees`, clamped to 0..=180.
pub fn pulse_width_us(degrees: u8) -> u32 {
    let deg = degrees.min(180) as u32;
    MIN_PULSE_US + (MAX_PULSE_US - MIN_PULSE_US) * deg / 180
}

/// TIM4 configured as a three-channel servo driver.
pub struct ServoPwm {
    tim: pac::TIM4,
}

impl ServoPwm {
    /// Configure TIM4 for 50 Hz servo frames.
    ///
    /// `timer_clock_hz` is the APB1 timer clock feeding TIM4.
    pub fn tim4(tim4: pac::TIM4, timer_clock_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        let tim = tim4;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // 1 MHz tick, 20 ms period
        let psc = (timer_clock_hz / 1_000_000).saturating_sub(1);
        tim.psc.write(|w| unsafe { w.bits(psc) });
        tim.arr.write(|w| unsafe { w.bits(PERIOD_US - 1) });

        // CH1, CH2 in CCMR1; CH3 in CCMR2
        tim.ccmr1_output()
            .write(|w| unsafe { w.bits(OC_PWM1_PRELOAD | (OC_PWM1_PRELOAD << 8)) });
        tim.ccmr2_output().write(|w| unsafe { w.bits(OC_PWM1_PRELOAD) });

        let idle = pulse_width_us(INITIAL_ANGLE);
        tim.ccr1().write(|w| unsafe { w.bits(idle) });
        tim.ccr2().write(|w| unsafe { w.bits(idle) });
        tim.ccr3().write(|w| unsafe { w.bits(idle) });

        // Enable CH1..CH3 outputs, active high
        tim.ccer
            .write(|w| unsafe { w.bits((1 << 0) | (1 << 4) | (1 << 8)) });

        // Latch PSC/ARR/CCR, then start with auto-reload preload
        tim.egr.write(|w| unsafe { w.bits(1) });
        tim.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());

        Self { tim }
    }

    /// Split into one handle per servo channel.
    ///
    /// The peripheral token is consumed so nothing else can reconfigure the timer; channels reach
    /// their compare registers through the TIM4 register block.
    pub fn split(self) -> (ServoChannel<1>, ServoChannel<2>, ServoChannel<3>) {
        drop(self.tim);
        (
            ServoChannel::new(),
            ServoChannel::new(),
            ServoChannel::new(),
        )
    }
}

/// One TIM4 compare channel driving a servo.
pub struct ServoChannel<const CH: u8> {
    angle: u8,
}

impl<const CH: u8> ServoChannel<CH> {
    fn new() -> Self {
        Self {
            angle: INITIAL_ANGLE,
        }
    }
}

impl<const CH: u8> AngleActuator for ServoChannel<CH> {
    fn write(&mut self, degrees: u8) {
        let degrees = degrees.min(180);
        let pulse = pulse_width_us(degrees);

        // Each channel only touches its own CCR.
        let tim = unsafe { &*pac::TIM4::ptr() };
        match CH {
            1 => tim.ccr1().write(|w| unsafe { w.bits(pulse) }),
            2 => tim.ccr2().write(|w| unsafe { w.bits(pulse) }),
            3 => tim.ccr3().write(|w| unsafe { w.bits(pulse) }),
            _ => unreachable!(),
        }
        self.angle = degrees;
    }

    #[inline]
    fn read(&self) -> u8 {
        self.angle
    }
}
