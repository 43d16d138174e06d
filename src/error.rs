// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Crate-wide error type.

use core::fmt;

use crate::hw::adc::AdcError;
use crate::system::scheduler::SchedulerError;

/// Errors returned by module lifecycle operations.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The operation is not allowed in the current module state.
    InvalidAction,
    /// A configuration value violates its invariants.
    InvalidConfig,
    /// The ADC service rejected a request.
    Adc(AdcError),
    /// The scheduler rejected a request.
    Scheduler(SchedulerError),
}

impl From<AdcError> for Error {
    fn from(e: AdcError) -> Self {
        Error::Adc(e)
    }
}

impl From<SchedulerError> for Error {
    fn from(e: SchedulerError) -> Self {
        Error::Scheduler(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidAction => f.write_str("invalid action"),
            Error::InvalidConfig => f.write_str("invalid configuration"),
            Error::Adc(e) => write!(f, "adc: {e}"),
            Error::Scheduler(e) => write!(f, "scheduler: {e}"),
        }
    }
}
