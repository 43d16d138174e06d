// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! ADC service contract and the STM32F429 ADC1 implementation.
//!
//! Conversions are asynchronous: [`AdcService::start_conversion`] triggers one conversion and the
//! result is later handed to an [`AdcListener`]. On the target, the main loop calls
//! [`Adc::service`] to forward finished conversions.
//!
//! Example:
//! ```ignore
//! let mut adc = Adc::adc1(dp.ADC1);
//! adc.configure(&AdcConfig::new(AdcChannel::new(3), AdcResolution::Bits12))?;
//! adc.start_conversion(AdcChannel::new(3))?;
//! adc.service(&mut |channel, raw| { /* ... */ });
//! ```

use core::fmt;

/// Maximum 12-bit conversion result.
pub const ADC_MAX: u16 = 0xFFF;

/// ADC input channel number.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcChannel(u8);

impl AdcChannel {
    /// Highest channel number of ADC1 (IN0..IN15, temperature, VREFINT, VBAT).
    pub const MAX: u8 = 18;

    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 <= Self::MAX
    }
}

/// Conversion resolution.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcResolution {
    Bits12,
    Bits10,
    Bits8,
    Bits6,
}

impl AdcResolution {
    /// Largest code the ADC produces at this resolution.
    pub const fn max_code(self) -> u16 {
        match self {
            AdcResolution::Bits12 => 0xFFF,
            AdcResolution::Bits10 => 0x3FF,
            AdcResolution::Bits8 => 0xFF,
            AdcResolution::Bits6 => 0x3F,
        }
    }

    /// `RES` field encoding of `ADC_CR1`.
    pub const fn bits(self) -> u8 {
        match self {
            AdcResolution::Bits12 => 0b00,
            AdcResolution::Bits10 => 0b01,
            AdcResolution::Bits8 => 0b10,
            AdcResolution::Bits6 => 0b11,
        }
    }
}

/// One-time channel setup.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcConfig {
    pub channel: AdcChannel,
    pub resolution: AdcResolution,
}

impl AdcConfig {
    pub const fn new(channel: AdcChannel, resolution: AdcResolution) -> Self {
        Self {
            channel,
            resolution,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Channel number outside the ADC's input range.
    InvalidChannel,
    /// Conversion requested on a channel that was never configured.
    NotConfigured,
    /// A conversion is already in flight.
    Busy,
    /// The data register was overwritten before it was read.
    Overrun,
}

impl fmt::Display for AdcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AdcError::InvalidChannel => "invalid channel",
            AdcError::NotConfigured => "channel not configured",
            AdcError::Busy => "conversion in progress",
            AdcError::Overrun => "overrun",
        };
        f.write_str(s)
    }
}

/// ADC operations used by application modules.
pub trait AdcService {
    /// Configure a channel. Must be called before converting on it.
    fn configure(&mut self, config: &AdcConfig) -> Result<(), AdcError>;

    /// Trigger a single conversion. The result arrives later through an [`AdcListener`].
    fn start_conversion(&mut self, channel: AdcChannel) -> Result<(), AdcError>;
}

/// Receiver of finished conversions. Called at most once per requested conversion.
pub trait AdcListener {
    fn on_conversion(&mut self, channel: AdcChannel, raw: u16);
}

impl<F> AdcListener for F
where
    F: FnMut(AdcChannel, u16),
{
    fn on_conversion(&mut self, channel: AdcChannel, raw: u16) {
        self(channel, raw)
    }
}

#[cfg(feature = "firmware")]
pub use self::stm32::Adc;

#[cfg(feature = "firmware")]
mod stm32 {
    use stm32f4xx_hal::pac;

    use super::{AdcChannel, AdcConfig, AdcError, AdcListener, AdcResolution, AdcService};

    const CHANNELS: usize = AdcChannel::MAX as usize + 1;

    /// ADC1 driven directly through PAC registers, software triggered, one conversion at a time.
    pub struct Adc {
        adc: pac::ADC1,
        resolutions: [Option<AdcResolution>; CHANNELS],
        pending: Option<AdcChannel>,
    }

    impl Adc {
        /// Create and initialize ADC1.
        pub fn adc1(adc1: pac::ADC1) -> Self {
            let rcc = unsafe { &*pac::RCC::ptr() };
            rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

            // ADC prescaler: PCLK2 / 4
            let common = unsafe { &*pac::ADC_COMMON::ptr() };
            common.ccr.modify(|_, w| w.adcpre().div4());

            // Power off to configure
            adc1.cr2.modify(|_, w| w.adon().clear_bit());

            // Single conversion, right-aligned, software trigger
            adc1.cr2.modify(|_, w| {
                w.cont().clear_bit();
                w.align().right();
                w.exten().disabled();
                w
            });

            adc1.cr2.modify(|_, w| w.adon().set_bit());

            Self {
                adc: adc1,
                resolutions: [None; CHANNELS],
                pending: None,
            }
        }

        #[inline]
        pub fn free(self) -> pac::ADC1 {
            self.adc
        }

        /// Check for a finished conversion without blocking.
        pub fn poll(&mut self) -> nb::Result<(AdcChannel, u16), AdcError> {
            let channel = self.pending.ok_or(nb::Error::WouldBlock)?;
            let sr = self.adc.sr.read();

            if sr.ovr().bit_is_set() {
                self.adc.sr.modify(|_, w| w.ovr().clear_bit());
                self.pending = None;
                return Err(nb::Error::Other(AdcError::Overrun));
            }
            if sr.eoc().bit_is_clear() {
                return Err(nb::Error::WouldBlock);
            }

            // Reading DR clears EOC
            let raw = self.adc.dr.read().data().bits();
            self.pending = None;
            Ok((channel, raw))
        }

        /// Forward a finished conversion, if any, to `listener`.
        pub fn service(&mut self, listener: &mut impl AdcListener) {
            match self.poll() {
                Ok((channel, raw)) => listener.on_conversion(channel, raw),
                Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(e)) => warn!("adc conversion dropped: {}", e),
            }
        }
    }

    impl AdcService for Adc {
        fn configure(&mut self, config: &AdcConfig) -> Result<(), AdcError> {
            let ch = config.channel;
            if !ch.is_valid() {
                return Err(AdcError::InvalidChannel);
            }

            // Longest sample time (480 cycles) for source impedance tolerance
            let n = ch.number() as u32;
            if n <= 9 {
                self.adc
                    .smpr2
                    .modify(|r, w| unsafe { w.bits(r.bits() | (0b111 << (3 * n))) });
            } else {
                self.adc
                    .smpr1
                    .modify(|r, w| unsafe { w.bits(r.bits() | (0b111 << (3 * (n - 10)))) });
            }

            self.resolutions[ch.number() as usize] = Some(config.resolution);
            Ok(())
        }

        fn start_conversion(&mut self, channel: AdcChannel) -> Result<(), AdcError> {
            if !channel.is_valid() {
                return Err(AdcError::InvalidChannel);
            }
            let resolution =
                self.resolutions[channel.number() as usize].ok_or(AdcError::NotConfigured)?;
            if self.pending.is_some() {
                return Err(AdcError::Busy);
            }

            let res = resolution.bits();
            self.adc.cr1.modify(|_, w| unsafe { w.res().bits(res) });

            // Sequence length = 1 conversion
            self.adc.sqr1.modify(|_, w| unsafe { w.l().bits(0) });
            self.adc
                .sqr3
                .modify(|_, w| unsafe { w.sq1().bits(channel.number() & 0x1F) });

            self.pending = Some(channel);
            self.adc.cr2.modify(|_, w| w.swstart().set_bit());
            Ok(())
        }
    }
}
