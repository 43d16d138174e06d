// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Cooperative periodic task scheduler.
//!
//! Tasks are identified by a small `Copy` key (usually an enum) rather than a function pointer.
//! The main loop asks [`Scheduler::run_pending`] which tasks are due and dispatches them itself,
//! so every task runs to completion in the same context and never overlaps with itself.
//!
//! Works in `no_std` and does not allocate memory.

use core::fmt;

use fugit::{MillisDurationU32, TimerInstantU32};
use heapless::Vec;

/// Millisecond time base used by the scheduler.
pub type Instant = TimerInstantU32<1_000>;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// The task table has no free slot.
    Full,
    /// The task is already registered.
    AlreadyExists,
    /// The task is not registered.
    NotFound,
    /// Zero-length intervals are not allowed.
    InvalidInterval,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SchedulerError::Full => "task table full",
            SchedulerError::AlreadyExists => "task already exists",
            SchedulerError::NotFound => "task not found",
            SchedulerError::InvalidInterval => "invalid interval",
        };
        f.write_str(s)
    }
}

/// Registration interface consumed by application modules.
pub trait TaskScheduler<T> {
    /// Run `task` every `interval`, starting one interval from now.
    fn create_task(&mut self, task: T, interval: MillisDurationU32) -> Result<(), SchedulerError>;

    /// Remove `task` from execution.
    fn delete_task(&mut self, task: T) -> Result<(), SchedulerError>;
}

#[derive(Copy, Clone, Debug)]
struct Entry<T> {
    task: T,
    interval: MillisDurationU32,
    next_run: Instant,
}

/// Fixed-capacity task table for up to `N` periodic tasks.
pub struct Scheduler<T, const N: usize> {
    tasks: Vec<Entry<T>, N>,
    now: Instant,
}

impl<T, const N: usize> Scheduler<T, N>
where
    T: Copy + PartialEq,
{
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            now: Instant::from_ticks(0),
        }
    }

    /// Number of registered tasks.
    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, task: T) -> bool {
        self.tasks.iter().any(|e| e.task == task)
    }

    /// Advance the clock to `now` and collect every task that is due.
    ///
    /// A task that fell behind by several intervals is reported once and rescheduled relative to
    /// `now`.
    pub fn run_pending(&mut self, now: Instant) -> Vec<T, N> {
        self.now = now;

        let mut due = Vec::new();
        for entry in self.tasks.iter_mut() {
            if now >= entry.next_run {
                entry.next_run = now + entry.interval;
                // Capacity equals the table size
                let _ = due.push(entry.task);
            }
        }
        due
    }
}

impl<T, const N: usize> Default for Scheduler<T, N>
where
    T: Copy + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> TaskScheduler<T> for Scheduler<T, N>
where
    T: Copy + PartialEq,
{
    fn create_task(&mut self, task: T, interval: MillisDurationU32) -> Result<(), SchedulerError> {
        if interval.ticks() == 0 {
            return Err(SchedulerError::InvalidInterval);
        }
        if self.contains(task) {
            return Err(SchedulerError::AlreadyExists);
        }

        self.tasks
            .push(Entry {
                task,
                interval,
                next_run: self.now + interval,
            })
            .map_err(|_| SchedulerError::Full)?;
        trace!("task created, interval {} ms", interval.ticks());
        Ok(())
    }

    fn delete_task(&mut self, task: T) -> Result<(), SchedulerError> {
        let index = self
            .tasks
            .iter()
            .position(|e| e.task == task)
            .ok_or(SchedulerError::NotFound)?;
        self.tasks.remove(index);
        trace!("task deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fugit::ExtU32;

    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    enum Task {
        Fast,
        Slow,
    }

    fn at(ms: u32) -> Instant {
        Instant::from_ticks(ms)
    }

    #[test]
    fn tasks_run_once_per_interval() {
        let mut s: Scheduler<Task, 4> = Scheduler::new();
        s.create_task(Task::Fast, 100.millis()).unwrap();
        s.create_task(Task::Slow, 250.millis()).unwrap();

        assert!(s.run_pending(at(50)).is_empty());
        assert_eq!(s.run_pending(at(100)).as_slice(), &[Task::Fast]);
        assert!(s.run_pending(at(150)).is_empty());
        assert_eq!(s.run_pending(at(200)).as_slice(), &[Task::Fast]);
        assert_eq!(s.run_pending(at(250)).as_slice(), &[Task::Slow]);
        assert_eq!(s.run_pending(at(300)).as_slice(), &[Task::Fast]);
    }

    #[test]
    fn late_poll_reports_task_once() {
        let mut s: Scheduler<Task, 2> = Scheduler::new();
        s.create_task(Task::Fast, 10.millis()).unwrap();

        assert_eq!(s.run_pending(at(55)).as_slice(), &[Task::Fast]);
        assert!(s.run_pending(at(60)).is_empty());
        assert_eq!(s.run_pending(at(65)).as_slice(), &[Task::Fast]);
    }

    #[test]
    fn interval_starts_from_registration_time() {
        let mut s: Scheduler<Task, 2> = Scheduler::new();
        s.run_pending(at(1_000));
        s.create_task(Task::Fast, 100.millis()).unwrap();

        assert!(s.run_pending(at(1_099)).is_empty());
        assert_eq!(s.run_pending(at(1_100)).as_slice(), &[Task::Fast]);
    }

    #[test]
    fn duplicate_and_missing_tasks_are_rejected() {
        let mut s: Scheduler<Task, 2> = Scheduler::new();
        s.create_task(Task::Fast, 100.millis()).unwrap();

        assert_eq!(
            s.create_task(Task::Fast, 50.millis()),
            Err(SchedulerError::AlreadyExists)
        );
        assert_eq!(s.delete_task(Task::Slow), Err(SchedulerError::NotFound));
        assert_eq!(s.delete_task(Task::Fast), Ok(()));
        assert!(s.is_empty());
        assert!(s.run_pending(at(500)).is_empty());
    }

    #[test]
    fn full_table_and_zero_interval_are_rejected() {
        let mut s: Scheduler<Task, 1> = Scheduler::new();
        assert_eq!(
            s.create_task(Task::Fast, 0.millis()),
            Err(SchedulerError::InvalidInterval)
        );
        s.create_task(Task::Fast, 1.millis()).unwrap();
        assert_eq!(s.create_task(Task::Slow, 1.millis()), Err(SchedulerError::Full));
        assert_eq!(s.len(), 1);
    }
}
