// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # STM32F7 Board Support
//!
//! MCU-level implementations of the `io` capabilities for the Betelbot controller board.
//!
//! | Module | Provides |
//! | ------ | -------- |
//! | [`servo_pwm`] | [`AngleActuator`](crate::io::AngleActuator) on TIM4 channels |
//! | [`sonar`] | [`PingPin`](crate::io::PingPin) on trigger/echo GPIOs |
//! | [`clock`] | [`Clock`](crate::io::Clock) on SysTick, `DelayNs` on the core clock |
//! | [`adc`] | `FnMut() -> u16` readers on ADC1 |
//! | [`console`] | USART debug output |
//! | [`pins`] | Board pin map |

pub mod adc;
pub mod clock;
pub mod console;
pub mod pins;
pub mod servo_pwm;
pub mod sonar;

pub use adc::Adc;
pub use clock::{CycleDelay, SysTickClock};
pub use console::Console;
pub use pins::BoardPins;
pub use servo_pwm::{ServoChannel, ServoPwm};
pub use sonar::Sonar;
