// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! GPIO pin configuration.
//!
//! Output levels go through [`embedded_hal::digital::OutputPin`]; this module only covers the
//! electrical configuration (mode, output type, speed, pull) that `embedded-hal` leaves out.

/// Pin mode, in `MODER` encoding order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioMode {
    Input = 0b00,
    Output = 0b01,
    Alternate = 0b10,
    Analog = 0b11,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputType {
    PushPull,
    OpenDrain,
}

/// Output slew rate, in `OSPEEDR` encoding order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioSpeed {
    Low = 0b00,
    Medium = 0b01,
    High = 0b10,
    VeryHigh = 0b11,
}

/// Internal resistor, in `PUPDR` encoding order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioPull {
    None = 0b00,
    Up = 0b01,
    Down = 0b10,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioConfig {
    pub mode: GpioMode,
    pub output_type: OutputType,
    pub speed: GpioSpeed,
    pub pull: GpioPull,
}

impl GpioConfig {
    /// Digital output with the given output type, low speed and no pull.
    pub const fn output(output_type: OutputType) -> Self {
        Self {
            mode: GpioMode::Output,
            output_type,
            speed: GpioSpeed::Low,
            pull: GpioPull::None,
        }
    }

    pub const fn with_speed(mut self, speed: GpioSpeed) -> Self {
        self.speed = speed;
        self
    }

    pub const fn with_pull(mut self, pull: GpioPull) -> Self {
        self.pull = pull;
        self
    }
}

/// A pin whose electrical configuration can be changed at runtime.
///
/// Pins whose mode is fixed by their type only apply the speed and pull.
pub trait ConfigurePin {
    fn configure(&mut self, config: &GpioConfig);
}
