// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Services
//!
//! - [`adc`] - ADC service contract and the ADC1 implementation.
//! - [`gpio`] - Pin electrical configuration.
//! - [`alarm`] - Alarm output line with configurable active level.
//! - `pins` - Board pin map (`firmware` feature only).

pub mod adc;
pub mod alarm;
pub mod gpio;
#[cfg(feature = "firmware")]
pub mod pins;

pub use adc::{AdcChannel, AdcConfig, AdcError, AdcListener, AdcResolution, AdcService};
pub use alarm::{ActiveLevel, AlarmLine};
pub use gpio::{ConfigurePin, GpioConfig};
