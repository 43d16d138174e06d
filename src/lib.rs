// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # STM32F429 Voltage Supervisor Firmware
//!
//! This crate contains a layered firmware skeleton for an STM32F429 MCU: hardware services, system
//! services, and a voltage supervisor application module built on top of them.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | ADC and GPIO service contracts, STM32F429 implementations, alarm line |
//! | [`system`] | Cooperative task scheduler, system error/warning flags |
//! | [`supervisor`] | Voltage supervisor: sampling filter and hysteresis threshold monitor |
//!
//! ## Getting Started
//!
//! Run the unit tests on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Build and flash the firmware:
//!
//! ```bash
//! cargo run --release --features firmware --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod error;
pub mod hw;
pub mod supervisor;
pub mod system;

#[cfg(test)]
mod testing;

pub use error::Error;
