// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F429ZI supervisor board.

use stm32f4xx_hal::{
    gpio::{gpioa, gpiog, Analog, GpioExt, OpenDrain, Output, Pin, Pull, PushPull, Speed},
    pac,
};

use crate::hw::gpio::{ConfigurePin, GpioConfig, GpioMode, GpioPull, GpioSpeed, OutputType};

/// All board pins used by the firmware. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOG);
/// ```
pub struct BoardPins {
    /// 12V rail through a divider, ADC1_IN3
    pub supply_sense: gpioa::PA3<Analog>,
    /// Alarm line, pulled low on alarm
    pub alarm: gpiog::PG13<Output<OpenDrain>>,
}

impl BoardPins {
    pub fn new(gpioa: pac::GPIOA, gpiog: pac::GPIOG) -> Self {
        let gpioa = gpioa.split();
        let gpiog = gpiog.split();

        Self {
            supply_sense: gpioa.pa3.into_analog(),
            alarm: gpiog
                .pg13
                .into_open_drain_output()
                .speed(Speed::Low)
                .internal_resistor(Pull::None),
        }
    }
}

fn hal_speed(speed: GpioSpeed) -> Speed {
    match speed {
        GpioSpeed::Low => Speed::Low,
        GpioSpeed::Medium => Speed::Medium,
        GpioSpeed::High => Speed::High,
        GpioSpeed::VeryHigh => Speed::VeryHigh,
    }
}

fn hal_pull(pull: GpioPull) -> Pull {
    match pull {
        GpioPull::None => Pull::None,
        GpioPull::Up => Pull::Up,
        GpioPull::Down => Pull::Down,
    }
}

// The mode and output type of a HAL pin are fixed by its type; only speed and pull change at
// runtime.
impl<const P: char, const N: u8> ConfigurePin for Pin<P, N, Output<OpenDrain>> {
    fn configure(&mut self, config: &GpioConfig) {
        if config.mode != GpioMode::Output || config.output_type != OutputType::OpenDrain {
            warn!("pin {}{} is an open-drain output, mode request ignored", P, N);
        }
        self.set_speed(hal_speed(config.speed));
        self.set_internal_resistor(hal_pull(config.pull));
    }
}

impl<const P: char, const N: u8> ConfigurePin for Pin<P, N, Output<PushPull>> {
    fn configure(&mut self, config: &GpioConfig) {
        if config.mode != GpioMode::Output || config.output_type != OutputType::PushPull {
            warn!("pin {}{} is a push-pull output, mode request ignored", P, N);
        }
        self.set_speed(hal_speed(config.speed));
        self.set_internal_resistor(hal_pull(config.pull));
    }
}
