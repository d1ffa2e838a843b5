// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Drives the scanner, the servo drive and both wheel encoders from one cooperative loop on a
//! simulated robot, the same way the firmware does.

use std::cell::Cell;
use std::rc::Rc;

use betelbot::io::{AngleActuator, Clock, PinMode, PinState, PingPin};
use betelbot::{
    CounterStatus, DriveAngles, EncoderConfig, Hysteresis, RangeScanner, ScannerConfig,
    ScannerStatus, ServoDrive, TickCounter,
};
use embedded_hal::delay::DelayNs;

const SWEEP_MS: u32 = 300;
const STRIPES: u16 = 8;
const CLEARANCE_CM: u32 = 20;

#[derive(Clone, Default)]
struct SimClock(Rc<Cell<u32>>);

impl Clock for SimClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

/// Servo whose commanded angle is visible to the rest of the simulation.
#[derive(Clone)]
struct SimServo(Rc<Cell<u8>>);

impl SimServo {
    fn at(angle: u8) -> Self {
        Self(Rc::new(Cell::new(angle)))
    }
}

impl AngleActuator for SimServo {
    fn write(&mut self, degrees: u8) {
        self.0.set(degrees);
    }

    fn read(&self) -> u8 {
        self.0.get()
    }
}

/// PING))) that echoes whatever obstacle sits in the direction the mount points.
struct SimPing {
    mount: Rc<Cell<u8>>,
    /// (angle, distance in cm); 0 cm means nothing in range.
    obstacles: Rc<Cell<[(u8, u32); 3]>>,
}

impl PingPin for SimPing {
    fn set_mode(&mut self, _mode: PinMode) {}

    fn set_level(&mut self, _level: PinState) {}

    fn level(&mut self) -> PinState {
        PinState::Low
    }

    fn measure_pulse(&mut self, _level: PinState, _timeout_us: u32) -> u32 {
        let angle = self.mount.get();
        self.obstacles
            .get()
            .iter()
            .find(|(a, _)| *a == angle)
            .map_or(0, |&(_, cm)| cm * 29 * 2)
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Striped wheel that advances one stripe every few loop iterations while its servo is driven.
#[derive(Clone)]
struct SimWheel {
    servo: Rc<Cell<u8>>,
    position: Rc<Cell<u32>>,
    /// Loop iterations spent on each stripe.
    stripe_len: u32,
}

impl SimWheel {
    fn advance(&self) {
        if self.servo.get() != 90 {
            self.position.set(self.position.get() + 1);
        }
    }

    fn reader(&self) -> impl FnMut() -> u16 {
        let position = self.position.clone();
        let stripe_len = self.stripe_len;
        move || if (position.get() / stripe_len) % 2 == 0 { 100 } else { 900 }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Phase {
    Driving,
    Scanning(usize),
}

type Scanner = RangeScanner<SimServo, SimPing, NoDelay, SimClock>;

struct Robot<LR, RR> {
    clock: SimClock,
    scanner: Scanner,
    drive: ServoDrive<SimServo, SimServo>,
    left: TickCounter<LR>,
    right: TickCounter<RR>,
    wheels: (SimWheel, SimWheel),
    left_servo: Rc<Cell<u8>>,

    phase: Phase,
    readings: [u32; 3],
    /// Completed scans, each as right/forward/left readings.
    scans: Vec<[u32; 3]>,
    /// (time, settle delay) for every sweep that reached Ready.
    settles: Vec<(u32, u32)>,
    /// Left/right distance reported at each stop.
    odometry: Vec<(f32, f32)>,
    runs: u32,
}

fn robot(
    obstacles: Rc<Cell<[(u8, u32); 3]>>,
) -> Robot<impl FnMut() -> u16, impl FnMut() -> u16> {
    robot_with_stripes(obstacles, 3, 3)
}

fn robot_with_stripes(
    obstacles: Rc<Cell<[(u8, u32); 3]>>,
    left_stripe: u32,
    right_stripe: u32,
) -> Robot<impl FnMut() -> u16, impl FnMut() -> u16> {
    let clock = SimClock::default();
    let mount = SimServo::at(90);
    let ping = SimPing {
        mount: mount.0.clone(),
        obstacles,
    };
    let scanner = RangeScanner::new(
        mount,
        ping,
        NoDelay,
        clock.clone(),
        ScannerConfig::new(SWEEP_MS),
    )
    .unwrap();

    let left_servo = SimServo::at(90);
    let right_servo = SimServo::at(90);
    let wheels = (
        SimWheel {
            servo: left_servo.0.clone(),
            position: Rc::default(),
            stripe_len: left_stripe,
        },
        SimWheel {
            servo: right_servo.0.clone(),
            position: Rc::default(),
            stripe_len: right_stripe,
        },
    );
    let left_probe = left_servo.0.clone();
    let drive = ServoDrive::new(left_servo, right_servo, DriveAngles::default());

    let cfg = EncoderConfig::new(3.0, STRIPES, Hysteresis::new(300, 700).unwrap()).unwrap();
    let left = TickCounter::new(cfg, wheels.0.reader()).unwrap();
    let right = TickCounter::new(cfg, wheels.1.reader()).unwrap();

    let mut robot = Robot {
        clock,
        scanner,
        drive,
        left,
        right,
        wheels,
        left_servo: left_probe,
        phase: Phase::Driving,
        readings: [0; 3],
        scans: Vec::new(),
        settles: Vec::new(),
        odometry: Vec::new(),
        runs: 0,
    };
    robot.resume();
    robot
}

impl<LR, RR> Robot<LR, RR>
where
    LR: FnMut() -> u16,
    RR: FnMut() -> u16,
{
    fn resume(&mut self) {
        self.drive.forward();
        self.left.run();
        self.right.run();
        self.runs += 1;
    }

    fn is_driving(&self) -> bool {
        self.left_servo.get() != 90
    }

    /// One loop iteration, then 1 ms of simulated time.
    fn step(&mut self) {
        self.left.on_tick();
        self.right.on_tick();

        match self.phase {
            Phase::Driving => {
                let left_cm = self.left.distance_cm();
                let right_cm = self.right.distance_cm();
                if self.left.poll() == CounterStatus::Idle {
                    self.drive.stop();
                    self.right.sleep();
                    self.odometry.push((left_cm, right_cm));
                    self.scanner.sweep_to_right();
                    self.phase = Phase::Scanning(0);
                }
            }
            Phase::Scanning(step) => {
                if self.scanner.poll() == ScannerStatus::Ready {
                    self.settles
                        .push((self.clock.now_ms(), self.scanner.active_sweep_delay_ms()));
                    self.readings[step] = self.scanner.take_reading();
                    self.phase = match step {
                        0 => {
                            self.scanner.sweep_to_forward();
                            Phase::Scanning(1)
                        }
                        1 => {
                            self.scanner.sweep_to_left();
                            Phase::Scanning(2)
                        }
                        _ => {
                            self.scans.push(self.readings);
                            let ahead = self.readings[1];
                            if ahead == 0 || ahead > CLEARANCE_CM {
                                self.resume();
                                Phase::Driving
                            } else {
                                self.scanner.sweep_to_right();
                                Phase::Scanning(0)
                            }
                        }
                    };
                }
            }
        }

        self.wheels.0.advance();
        self.wheels.1.advance();
        self.clock.0.set(self.clock.0.get() + 1);
    }

    fn run_until(&mut self, mut done: impl FnMut(&Self) -> bool, budget_ms: u32) {
        for _ in 0..budget_ms {
            if done(&*self) {
                return;
            }
            self.step();
        }
        panic!("loop did not converge within {budget_ms} ms ({:?})", self.phase);
    }
}

fn obstacles(right: u32, forward: u32, left: u32) -> Rc<Cell<[(u8, u32); 3]>> {
    Rc::new(Cell::new([(0, right), (90, forward), (180, left)]))
}

#[test]
fn drives_one_turn_then_scans_right_forward_left() {
    let mut bot = robot(obstacles(40, 120, 15));
    assert!(bot.is_driving());

    bot.run_until(|b| matches!(b.phase, Phase::Scanning(_)), 1_000);
    assert!(!bot.is_driving(), "wheels stop before scanning");
    assert_eq!(bot.left.status(), CounterStatus::Idle);
    assert_eq!(bot.right.status(), CounterStatus::Idle);

    bot.run_until(|b| !b.scans.is_empty(), 2_000);
    assert_eq!(bot.scans[0], [40, 120, 15]);

    // Mount starts at forward: 90 -> 0 -> 90 -> 180 never passes over forward.
    let delays: Vec<u32> = bot.settles.iter().map(|&(_, d)| d).collect();
    assert_eq!(delays, [SWEEP_MS; 3]);
    for pair in bot.settles.windows(2) {
        assert!(pair[1].0 - pair[0].0 >= pair[1].1);
    }

    // Clear ahead: back on the road.
    assert_eq!(bot.phase, Phase::Driving);
    assert!(bot.is_driving());
    assert_eq!(bot.runs, 2);
}

#[test]
fn missing_echo_ahead_counts_as_clear() {
    let mut bot = robot(obstacles(0, 0, 0));

    bot.run_until(|b| !b.scans.is_empty(), 3_000);
    assert_eq!(bot.scans[0], [0, 0, 0]);
    assert_eq!(bot.phase, Phase::Driving);
}

#[test]
fn blocked_ahead_keeps_scanning_until_clear() {
    let world = obstacles(50, 10, 50);
    let mut bot = robot(world.clone());

    bot.run_until(|b| b.scans.len() == 2, 5_000);
    assert!(!bot.is_driving());
    assert_eq!(bot.runs, 1);

    // Rescan starts from the left stop, so the first sweep crosses forward.
    assert_eq!(bot.settles[3].1, 2 * SWEEP_MS);

    world.set([(0, 50), (90, 200), (180, 50)]);
    bot.run_until(|b| b.phase == Phase::Driving, 5_000);
    assert_eq!(bot.scans.last(), Some(&[50, 200, 50]));
    assert!(bot.is_driving());
    assert_eq!(bot.runs, 2);
}

#[test]
fn repeated_run_does_not_restart_a_cycle() {
    let mut bot = robot(obstacles(100, 100, 100));

    for _ in 0..10 {
        bot.step();
    }
    let ticks = bot.left.ticks();
    assert!(ticks > 0);

    bot.left.run();
    assert_eq!(bot.left.ticks(), ticks);
    assert_eq!(bot.left.status(), CounterStatus::Counting);
}

#[test]
fn fast_right_wheel_reports_full_turn_at_stop() {
    let mut bot = robot_with_stripes(obstacles(100, 100, 100), 3, 2);

    bot.run_until(|b| !b.odometry.is_empty(), 1_000);
    let turn = bot.left.circumference_cm();
    assert_eq!(bot.odometry[0], (turn, turn));
}

#[test]
fn slow_right_wheel_reports_partial_turn_at_stop() {
    let mut bot = robot_with_stripes(obstacles(100, 100, 100), 3, 5);

    bot.run_until(|b| !b.odometry.is_empty(), 1_000);
    let (left_cm, right_cm) = bot.odometry[0];
    assert_eq!(left_cm, bot.left.circumference_cm());
    assert!(right_cm > 0.0 && right_cm < left_cm);
}
