// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Alarm output line.

use embedded_hal::digital::OutputPin;

use crate::hw::gpio::{ConfigurePin, GpioConfig};

/// Whether the alarm is signalled by driving the line high or low.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    High,
    Low,
}

/// Alarm line that remembers its active level and last driven state.
pub struct AlarmLine<PIN> {
    pin: PIN,
    active: ActiveLevel,
    is_active: bool,
}

impl<PIN> AlarmLine<PIN>
where
    PIN: OutputPin + ConfigurePin,
{
    /// Wrap a pin. Nothing is written until [`configure`](Self::configure).
    pub fn new(pin: PIN, active: ActiveLevel) -> Self {
        Self {
            pin,
            active,
            is_active: false,
        }
    }

    pub fn active_high(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    pub fn active_low(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    /// Apply the electrical configuration and release the alarm.
    pub fn configure(&mut self, config: &GpioConfig) {
        self.pin.configure(config);
        self.set(false);
    }

    /// Drive the alarm logically active (true) or inactive (false).
    pub fn set(&mut self, active: bool) {
        match (self.active, active) {
            (ActiveLevel::High, true) | (ActiveLevel::Low, false) => self.pin.set_high().ok(),
            (ActiveLevel::High, false) | (ActiveLevel::Low, true) => self.pin.set_low().ok(),
        };
        self.is_active = active;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::gpio::OutputType;
    use crate::testing::{Level, MockPin};

    #[test]
    fn active_low_line_pulls_low_when_raised() {
        let pin = MockPin::default();
        let mut alarm = AlarmLine::active_low(pin.clone());
        assert!(pin.writes().is_empty());

        alarm.configure(&GpioConfig::output(OutputType::OpenDrain));
        alarm.set(true);

        assert_eq!(pin.writes(), [Level::High, Level::Low]);
        assert_eq!(pin.config(), Some(GpioConfig::output(OutputType::OpenDrain)));
    }

    #[test]
    fn active_high_line_follows_state() {
        let pin = MockPin::default();
        let mut alarm = AlarmLine::active_high(pin.clone());
        alarm.set(true);
        assert!(alarm.is_active());
        alarm.set(false);
        assert!(!alarm.is_active());
        assert_eq!(pin.writes(), [Level::High, Level::Low]);
    }
}
