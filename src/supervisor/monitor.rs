// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-sided voltage threshold monitor with hysteresis.
//!
//! Undervoltage and overvoltage are tracked independently. Each side trips on a strict crossing of
//! its trip limit and recovers once the voltage reaches its recovery limit, which lies inside the
//! normal band. A single evaluation may change both sides.

use crate::error::Error;

/// Voltage limits in 0.01 V units.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    uv_trip: u16,
    uv_recover: u16,
    ov_trip: u16,
    ov_recover: u16,
}

impl Thresholds {
    /// Create a validated set of limits.
    ///
    /// Fails with [`Error::InvalidConfig`] unless `uv_trip < uv_recover <= ov_recover < ov_trip`.
    pub const fn new(
        uv_trip: u16,
        uv_recover: u16,
        ov_trip: u16,
        ov_recover: u16,
    ) -> Result<Self, Error> {
        if uv_recover <= uv_trip || ov_recover >= ov_trip || uv_recover > ov_recover {
            return Err(Error::InvalidConfig);
        }
        Ok(Self {
            uv_trip,
            uv_recover,
            ov_trip,
            ov_recover,
        })
    }

    #[inline]
    pub const fn uv_trip(&self) -> u16 {
        self.uv_trip
    }

    #[inline]
    pub const fn uv_recover(&self) -> u16 {
        self.uv_recover
    }

    #[inline]
    pub const fn ov_trip(&self) -> u16 {
        self.ov_trip
    }

    #[inline]
    pub const fn ov_recover(&self) -> u16 {
        self.ov_recover
    }

    /// Evaluate both sides against `voltage`, starting from `current`.
    pub fn evaluate(&self, voltage: u16, current: AlarmState) -> Evaluation {
        let undervoltage = match current.undervoltage {
            false if voltage < self.uv_trip => Some(Transition::Raised),
            true if voltage >= self.uv_recover => Some(Transition::Cleared),
            _ => None,
        };
        let overvoltage = match current.overvoltage {
            false if voltage > self.ov_trip => Some(Transition::Raised),
            true if voltage <= self.ov_recover => Some(Transition::Cleared),
            _ => None,
        };

        Evaluation {
            state: AlarmState {
                undervoltage: Transition::apply(undervoltage, current.undervoltage),
                overvoltage: Transition::apply(overvoltage, current.overvoltage),
            },
            undervoltage,
            overvoltage,
        }
    }
}

impl Default for Thresholds {
    /// 10.50 V / 11.00 V undervoltage, 13.50 V / 13.00 V overvoltage.
    fn default() -> Self {
        Self {
            uv_trip: 1050,
            uv_recover: 1100,
            ov_trip: 1350,
            ov_recover: 1300,
        }
    }
}

/// Active warning conditions.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmState {
    pub undervoltage: bool,
    pub overvoltage: bool,
}

impl AlarmState {
    /// Level of the combined alarm output.
    #[inline]
    pub fn any(&self) -> bool {
        self.undervoltage || self.overvoltage
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    Raised,
    Cleared,
}

impl Transition {
    fn apply(t: Option<Transition>, active: bool) -> bool {
        match t {
            Some(Transition::Raised) => true,
            Some(Transition::Cleared) => false,
            None => active,
        }
    }
}

/// Outcome of one evaluation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Evaluation {
    pub state: AlarmState,
    pub undervoltage: Option<Transition>,
    pub overvoltage: Option<Transition>,
}

impl Evaluation {
    /// True if either side changed, i.e. the alarm output must be rewritten.
    #[inline]
    pub fn alarm_changed(&self) -> bool {
        self.undervoltage.is_some() || self.overvoltage.is_some()
    }
}

/// Threshold evaluation with stored state.
pub struct ThresholdMonitor {
    thresholds: Thresholds,
    state: AlarmState,
}

impl ThresholdMonitor {
    pub const fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            state: AlarmState {
                undervoltage: false,
                overvoltage: false,
            },
        }
    }

    /// Evaluate a new measurement and keep the resulting state.
    pub fn update(&mut self, voltage: u16) -> Evaluation {
        let eval = self.thresholds.evaluate(voltage, self.state);
        self.state = eval.state;
        eval
    }

    #[inline]
    pub fn state(&self) -> AlarmState {
        self.state
    }

    #[inline]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn reset(&mut self) {
        self.state = AlarmState::default();
    }
}
