// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Betelbot firmware: drive one wheel turn, stop, look right/forward/left, repeat.
//!
//! Every component is serviced from the single loop below. The only stall is the ultrasonic
//! reading, which is taken while the wheels are stopped.

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m_rt::{entry, exception};
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use betelbot::hw::pins::{LEFT_ENCODER_CHANNEL, RIGHT_ENCODER_CHANNEL};
use betelbot::hw::{Adc, BoardPins, Console, CycleDelay, ServoPwm, Sonar, SysTickClock};
use betelbot::{
    CounterStatus, DriveAngles, EncoderConfig, Hysteresis, RangeScanner, ScannerConfig,
    ScannerStatus, ServoDrive, TickCounter,
};

// Mechanical constants for the stock build
const SWEEP_DELAY_MS: u32 = 300;
const ECHO_TIMEOUT_US: u32 = 30_000;
const WHEEL_RADIUS_CM: f32 = 3.3;
const STRIPES_PER_TURN: u16 = 20;
const STRIPE_LOW: u16 = 1_200;
const STRIPE_HIGH: u16 = 2_800;

/// Anything closer than this straight ahead keeps the robot parked.
const CLEARANCE_CM: u32 = 20;

#[derive(Copy, Clone, PartialEq)]
enum Phase {
    Driving,
    /// Index into the right, forward, left scan order.
    Scanning(usize),
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let sysclk_hz = clocks.sysclk().raw();

    // DWT cycle counter times the echo pulse
    cp.DCB.enable_trace();
    cp.DWT.enable_cycle_counter();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // USART1 (DBG)
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        usart_cfg,
    );
    let mut console = Console::new(serial);
    console.println("betelbot up");

    let clock = SysTickClock::start(cp.SYST, sysclk_hz);
    let _servo_pins = pins.servos;
    let (mount, left_servo, right_servo) = ServoPwm::tim4(dp.TIM4, clocks.timclk1().raw()).split();

    // Scanner
    let sonar = Sonar::new(pins.sonar.trig, pins.sonar.echo, sysclk_hz);
    let scanner_cfg = ScannerConfig::new(SWEEP_DELAY_MS).with_echo_timeout_us(ECHO_TIMEOUT_US);
    let mut scanner =
        match RangeScanner::new(mount, sonar, CycleDelay::new(sysclk_hz), clock, scanner_cfg) {
            Ok(scanner) => scanner,
            Err(_) => halt(&mut console, "bad scanner config"),
        };

    // Drive
    let mut drive = ServoDrive::new(left_servo, right_servo, DriveAngles::default());
    drive.stop();

    // Wheel encoders
    let _encoder_pins = pins.encoders;
    let adc = RefCell::new(Adc::adc1(dp.ADC1));
    let encoder_cfg = match Hysteresis::new(STRIPE_LOW, STRIPE_HIGH)
        .and_then(|band| EncoderConfig::new(WHEEL_RADIUS_CM, STRIPES_PER_TURN, band))
    {
        Ok(cfg) => cfg,
        Err(_) => halt(&mut console, "bad encoder config"),
    };
    let left_reader = Adc::make_reader(&adc, LEFT_ENCODER_CHANNEL);
    let right_reader = Adc::make_reader(&adc, RIGHT_ENCODER_CHANNEL);
    let (mut left, mut right) = match (
        TickCounter::new(encoder_cfg, left_reader),
        TickCounter::new(encoder_cfg, right_reader),
    ) {
        (Ok(left), Ok(right)) => (left, right),
        _ => halt(&mut console, "bad encoder config"),
    };

    let mut readings = [0u32; 3];
    let mut phase = Phase::Driving;
    drive.forward();
    left.run();
    right.run();

    loop {
        left.on_tick();
        right.on_tick();

        match phase {
            Phase::Driving => {
                // The left wheel paces the run. The right counter is never polled, so a fast
                // right wheel holds at a full cycle instead of rolling over.
                let left_cm = left.distance_cm();
                let right_cm = right.distance_cm();
                if left.poll() == CounterStatus::Idle {
                    drive.stop();
                    right.sleep();
                    console.report("left", left_cm as u32, "cm");
                    console.report("right", right_cm as u32, "cm");

                    scanner.sweep_to_right();
                    phase = Phase::Scanning(0);
                }
            }

            Phase::Scanning(step) => {
                if scanner.poll() != ScannerStatus::Ready {
                    continue;
                }

                let cm = scanner.take_reading();
                readings[step] = cm;
                if cm == 0 {
                    console.report("no echo", scanner.target_angle() as u32, "deg");
                } else {
                    console.report("range", cm, "cm");
                }

                phase = match step {
                    0 => {
                        scanner.sweep_to_forward();
                        Phase::Scanning(1)
                    }
                    1 => {
                        scanner.sweep_to_left();
                        Phase::Scanning(2)
                    }
                    _ => {
                        // 0 means no echo, i.e. nothing in range
                        let ahead = readings[1];
                        if ahead == 0 || ahead > CLEARANCE_CM {
                            drive.forward();
                            left.run();
                            right.run();
                            Phase::Driving
                        } else {
                            scanner.sweep_to_right();
                            Phase::Scanning(0)
                        }
                    }
                };
            }
        }
    }
}

#[exception]
fn SysTick() {
    SysTickClock::on_tick();
}

/// Report a fatal startup error and park.
fn halt<U: hal::serial::Instance>(console: &mut Console<U>, msg: &str) -> ! {
    console.println(msg);
    loop {
        cortex_m::asm::nop();
    }
}
