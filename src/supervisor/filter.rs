// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Windowed averaging of raw ADC samples.
//!
//! Samples are summed until a window of [`WINDOW_SIZE`] is complete. The rounded mean of the window
//! is converted to a voltage in 0.01 V units and the accumulator starts over.

use crate::hw::adc::{AdcResolution, ADC_MAX};

/// Samples per averaged measurement.
pub const WINDOW_SIZE: u16 = 10;

/// Integer division rounding half up.
#[inline]
const fn div_round(a: u32, b: u32) -> u32 {
    (a + (b >> 1)) / b
}

pub struct SampleFilter {
    /// Voltage at full-scale ADC code, 0.01 V units
    full_scale: u16,
    /// Full-scale ADC code
    max_code: u16,
    sum: u32,
    count: u16,
    voltage: u16,
}

impl SampleFilter {
    /// Filter for 12-bit conversions.
    pub const fn new(full_scale: u16) -> Self {
        Self {
            full_scale,
            max_code: ADC_MAX,
            sum: 0,
            count: 0,
            voltage: 0,
        }
    }

    /// Scale conversions to the full-scale code of `resolution`.
    pub const fn with_resolution(mut self, resolution: AdcResolution) -> Self {
        self.max_code = resolution.max_code();
        self
    }

    /// Add one raw sample. Returns the new voltage when it completes a window.
    ///
    /// Codes above the full-scale code are clamped.
    pub fn record(&mut self, raw: u16) -> Option<u16> {
        self.sum += raw.min(self.max_code) as u32;
        self.count += 1;

        if self.count < WINDOW_SIZE {
            return None;
        }

        let mean = div_round(self.sum, self.count as u32) as u16;
        self.voltage = self.adc_to_voltage(mean);
        self.sum = 0;
        self.count = 0;
        Some(self.voltage)
    }

    /// Convert a code to 0.01 V units.
    pub fn adc_to_voltage(&self, adc: u16) -> u16 {
        div_round(adc as u32 * self.full_scale as u32, self.max_code as u32) as u16
    }

    /// Voltage of the last completed window, 0 before the first one.
    #[inline]
    pub fn voltage(&self) -> u16 {
        self.voltage
    }

    /// Samples in the current, incomplete window.
    #[inline]
    pub fn pending_samples(&self) -> u16 {
        self.count
    }

    pub fn reset(&mut self) {
        self.sum = 0;
        self.count = 0;
        self.voltage = 0;
    }
}
