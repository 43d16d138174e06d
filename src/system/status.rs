// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! System-wide error and warning flags.
//!
//! Modules report conditions through the [`SystemEvents`] trait. The notifications are
//! fire-and-forget; [`SystemStatus`] keeps them as atomic bit sets so that a single `static`
//! instance can be shared by reference between modules and interrupt handlers.

use core::sync::atomic::{AtomicU32, Ordering};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemError {
    /// The voltage supervisor could not request a measurement.
    SupervisorFailure = 0,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemWarning {
    Undervoltage = 0,
    Overvoltage = 1,
}

impl SystemError {
    #[inline]
    const fn mask(self) -> u32 {
        1 << self as u32
    }
}

impl SystemWarning {
    #[inline]
    const fn mask(self) -> u32 {
        1 << self as u32
    }
}

/// Sink for system-level notifications.
pub trait SystemEvents {
    fn raise_error(&self, flag: SystemError);
    fn clear_error(&self, flag: SystemError);
    fn raise_warning(&self, flag: SystemWarning);
    fn clear_warning(&self, flag: SystemWarning);
}

impl<S: SystemEvents + ?Sized> SystemEvents for &S {
    fn raise_error(&self, flag: SystemError) {
        (**self).raise_error(flag)
    }

    fn clear_error(&self, flag: SystemError) {
        (**self).clear_error(flag)
    }

    fn raise_warning(&self, flag: SystemWarning) {
        (**self).raise_warning(flag)
    }

    fn clear_warning(&self, flag: SystemWarning) {
        (**self).clear_warning(flag)
    }
}

/// Latched system flags.
pub struct SystemStatus {
    errors: AtomicU32,
    warnings: AtomicU32,
}

impl SystemStatus {
    pub const fn new() -> Self {
        Self {
            errors: AtomicU32::new(0),
            warnings: AtomicU32::new(0),
        }
    }

    #[inline]
    pub fn has_error(&self, flag: SystemError) -> bool {
        self.errors.load(Ordering::Relaxed) & flag.mask() != 0
    }

    #[inline]
    pub fn has_warning(&self, flag: SystemWarning) -> bool {
        self.warnings.load(Ordering::Relaxed) & flag.mask() != 0
    }

    /// True if any error flag is raised.
    #[inline]
    pub fn is_faulted(&self) -> bool {
        self.errors.load(Ordering::Relaxed) != 0
    }

    /// Raw error bits, one bit per [`SystemError`].
    pub fn error_bits(&self) -> u32 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Raw warning bits, one bit per [`SystemWarning`].
    pub fn warning_bits(&self) -> u32 {
        self.warnings.load(Ordering::Relaxed)
    }
}

impl Default for SystemStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemEvents for SystemStatus {
    fn raise_error(&self, flag: SystemError) {
        let prev = self.errors.fetch_or(flag.mask(), Ordering::Relaxed);
        if prev & flag.mask() == 0 {
            error!("system error raised: {}", flag);
        }
    }

    fn clear_error(&self, flag: SystemError) {
        self.errors.fetch_and(!flag.mask(), Ordering::Relaxed);
    }

    fn raise_warning(&self, flag: SystemWarning) {
        let prev = self.warnings.fetch_or(flag.mask(), Ordering::Relaxed);
        if prev & flag.mask() == 0 {
            warn!("system warning raised: {}", flag);
        }
    }

    fn clear_warning(&self, flag: SystemWarning) {
        let prev = self.warnings.fetch_and(!flag.mask(), Ordering::Relaxed);
        if prev & flag.mask() != 0 {
            info!("system warning cleared: {}", flag);
        }
    }
}
