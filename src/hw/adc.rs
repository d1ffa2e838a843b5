// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! ADC1 single-conversion reads for the wheel reflectance sensors.
//!
//! Thin wrapper over the PAC with blocking 12-bit reads (0..4095). Several sensors share one
//! converter through a `RefCell`:
//!
//! ```ignore
//! let adc = RefCell::new(Adc::adc1(dp.ADC1));
//! let left = Adc::make_reader(&adc, LEFT_ENCODER_CHANNEL);
//! let right = Adc::make_reader(&adc, RIGHT_ENCODER_CHANNEL);
//! ```

use core::cell::RefCell;

use stm32f7xx_hal::pac;

/// Longest sample time (480 cycles); the IR sensors are high-impedance.
const SMP_480: u8 = 0b111;

/// Highest ADC1 input with a sample-time slot.
pub const MAX_CHANNEL: u8 = 18;

pub struct Adc {
    adc: pac::ADC1,
}

impl Adc {
    /// Power up ADC1: 12-bit, right-aligned, software trigger, PCLK2 / 4.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        common.ccr.modify(|_, w| w.adcpre().div4());

        let adc = adc1;
        adc.cr2.modify(|_, w| w.adon().clear_bit());
        adc.cr1.modify(|_, w| w.res().bits(0b00));
        adc.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });
        adc.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc }
    }

    /// Convert `channel` once and return the raw reading.
    pub fn read(&mut self, channel: u8) -> u16 {
        let adc = &self.adc;
        let ch = channel & 0x1F;

        // Channels 0-9 live in SMPR2, 10-18 in SMPR1
        if ch <= 9 {
            adc.smpr2.modify(|_, w| match ch {
                0 => w.smp0().bits(SMP_480),
                1 => w.smp1().bits(SMP_480),
                2 => w.smp2().bits(SMP_480),
                3 => w.smp3().bits(SMP_480),
                4 => w.smp4().bits(SMP_480),
                5 => w.smp5().bits(SMP_480),
                6 => w.smp6().bits(SMP_480),
                7 => w.smp7().bits(SMP_480),
                8 => w.smp8().bits(SMP_480),
                _ => w.smp9().bits(SMP_480),
            });
        } else if ch <= MAX_CHANNEL {
            adc.smpr1.modify(|_, w| match ch {
                10 => w.smp10().bits(SMP_480),
                11 => w.smp11().bits(SMP_480),
                12 => w.smp12().bits(SMP_480),
                13 => w.smp13().bits(SMP_480),
                14 => w.smp14().bits(SMP_480),
                15 => w.smp15().bits(SMP_480),
                16 => w.smp16().bits(SMP_480),
                17 => w.smp17().bits(SMP_480),
                _ => w.smp18().bits(SMP_480),
            });
        }

        // Single conversion of `ch`
        adc.sqr1.modify(|_, w| w.l().bits(0));
        adc.sqr3.modify(|_, w| unsafe { w.sq1().bits(ch) });

        adc.cr2.modify(|_, w| w.swstart().set_bit());
        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits() as u16
    }

    /// Closure that reads `channel` from a shared ADC, for use as a sensor reader.
    pub fn make_reader(adc: &RefCell<Self>, channel: u8) -> impl FnMut() -> u16 + '_ {
        move || adc.borrow_mut().read(channel)
    }

    pub fn free(self) -> pac::ADC1 {
        self.adc
    }
}
