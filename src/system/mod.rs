// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # System Services
//!
//! Services shared by all application modules.
//!
//! ## Modules
//!
//! - [`scheduler`] - Cooperative periodic task scheduler.
//! - [`status`] - System-wide error and warning flags.

pub mod scheduler;
pub mod status;

pub use scheduler::{Instant, Scheduler, SchedulerError, TaskScheduler};
pub use status::{SystemError, SystemEvents, SystemStatus, SystemWarning};

/// Periodic tasks of the firmware.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskId {
    VoltageSupervisor,
}

/// Size of the firmware task table.
pub const MAX_TASKS: usize = 4;
