// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the Betelbot STM32F777 controller board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, gpiod, gpioe, Alternate, Analog, Floating, Input, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub usart1: Usart1Pins,
    pub servos: ServoPins,
    pub sonar: SonarPins,
    pub encoders: EncoderPins,
}

/// USART1 TX/RX (debug console)
pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// TIM4 servo outputs
pub struct ServoPins {
    pub mount: gpiod::PD12<Alternate<2>>, // TIM4_CH1
    pub left: gpiod::PD13<Alternate<2>>,  // TIM4_CH2
    pub right: gpiod::PD14<Alternate<2>>, // TIM4_CH3
}

/// Ultrasonic ranger trigger and echo lines
pub struct SonarPins {
    pub trig: gpioe::PE4<Output<PushPull>>,
    pub echo: gpioe::PE11<Input<Floating>>,
}

/// Wheel reflectance sensors
pub struct EncoderPins {
    pub left: gpioc::PC4<Analog>,  // ADC1_IN14
    pub right: gpioc::PC5<Analog>, // ADC1_IN15
}

/// ADC1 channel wired to the left wheel sensor.
pub const LEFT_ENCODER_CHANNEL: u8 = 14;

/// ADC1 channel wired to the right wheel sensor.
pub const RIGHT_ENCODER_CHANNEL: u8 = 15;

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        let mut trig = gpioe.pe4.into_push_pull_output();
        trig.set_low();

        Self {
            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            servos: ServoPins {
                mount: gpiod.pd12.into_alternate::<2>(),
                left: gpiod.pd13.into_alternate::<2>(),
                right: gpiod.pd14.into_alternate::<2>(),
            },

            sonar: SonarPins {
                trig,
                echo: gpioe.pe11.into_floating_input(),
            },

            encoders: EncoderPins {
                left: gpioc.pc4.into_analog(),
                right: gpioc.pc5.into_analog(),
            },
        }
    }
}
