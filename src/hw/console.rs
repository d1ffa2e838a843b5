// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART debug console.
//!
//! Prints scan and odometry reports to an attached terminal. Lines end in CRLF.
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* 115200
//! ```

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

pub struct Console<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Console<U> {
    /// Take the TX half of `serial`; RX is unused.
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    pub fn print_u32(&mut self, mut n: u32) {
        let mut buf = [0u8; 10];
        let mut i = buf.len();
        loop {
            i -= 1;
            buf[i] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for &b in &buf[i..] {
            self.write_byte(b);
        }
    }

    /// Print `label: value unit` on one line.
    pub fn report(&mut self, label: &str, value: u32, unit: &str) {
        self.write_str(label);
        self.write_str(": ");
        self.print_u32(value);
        self.write_byte(b' ');
        self.println(unit);
    }
}

impl<U: Instance> fmt::Write for Console<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Console::write_str(self, s);
        Ok(())
    }
}
