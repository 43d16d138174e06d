// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Recording test doubles for the hardware and system services.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{ErrorType, OutputPin};
use fugit::MillisDurationU32;

use crate::hw::adc::{AdcChannel, AdcConfig, AdcError, AdcService};
use crate::hw::gpio::{ConfigurePin, GpioConfig};
use crate::system::scheduler::{SchedulerError, TaskScheduler};
use crate::system::status::{SystemError, SystemEvents, SystemWarning};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Level {
    High,
    Low,
}

#[derive(Debug, Default)]
struct PinLog {
    writes: Vec<Level>,
    config: Option<GpioConfig>,
}

/// Output pin that records every write. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct MockPin(Rc<RefCell<PinLog>>);

impl MockPin {
    pub fn writes(&self) -> Vec<Level> {
        self.0.borrow().writes.clone()
    }

    pub fn config(&self) -> Option<GpioConfig> {
        self.0.borrow().config
    }

    pub fn clear(&self) {
        self.0.borrow_mut().writes.clear();
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().writes.push(Level::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().writes.push(Level::High);
        Ok(())
    }
}

impl ConfigurePin for MockPin {
    fn configure(&mut self, config: &GpioConfig) {
        self.0.borrow_mut().config = Some(*config);
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Event {
    RaiseError(SystemError),
    ClearError(SystemError),
    RaiseWarning(SystemWarning),
    ClearWarning(SystemWarning),
}

/// System sink that records notifications in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<Event>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<Event> {
        self.events.take()
    }
}

impl SystemEvents for RecordingSink {
    fn raise_error(&self, flag: SystemError) {
        self.events.borrow_mut().push(Event::RaiseError(flag));
    }

    fn clear_error(&self, flag: SystemError) {
        self.events.borrow_mut().push(Event::ClearError(flag));
    }

    fn raise_warning(&self, flag: SystemWarning) {
        self.events.borrow_mut().push(Event::RaiseWarning(flag));
    }

    fn clear_warning(&self, flag: SystemWarning) {
        self.events.borrow_mut().push(Event::ClearWarning(flag));
    }
}

/// ADC that records requests and fails on demand.
#[derive(Debug, Default)]
pub struct MockAdc {
    pub configured: Vec<AdcConfig>,
    pub conversions: Vec<AdcChannel>,
    pub configure_error: Option<AdcError>,
    pub conversion_error: Option<AdcError>,
}

impl AdcService for MockAdc {
    fn configure(&mut self, config: &AdcConfig) -> Result<(), AdcError> {
        if let Some(e) = self.configure_error {
            return Err(e);
        }
        self.configured.push(*config);
        Ok(())
    }

    fn start_conversion(&mut self, channel: AdcChannel) -> Result<(), AdcError> {
        if let Some(e) = self.conversion_error {
            return Err(e);
        }
        self.conversions.push(channel);
        Ok(())
    }
}

/// Scheduler that records registrations and fails on demand.
#[derive(Debug)]
pub struct MockScheduler<T> {
    pub created: Vec<(T, MillisDurationU32)>,
    pub deleted: Vec<T>,
    pub create_error: Option<SchedulerError>,
    pub delete_error: Option<SchedulerError>,
}

impl<T> Default for MockScheduler<T> {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            deleted: Vec::new(),
            create_error: None,
            delete_error: None,
        }
    }
}

impl<T> MockScheduler<T> {
    pub fn calls(&self) -> usize {
        self.created.len() + self.deleted.len()
    }
}

impl<T> TaskScheduler<T> for MockScheduler<T> {
    fn create_task(&mut self, task: T, interval: MillisDurationU32) -> Result<(), SchedulerError> {
        if let Some(e) = self.create_error {
            return Err(e);
        }
        self.created.push((task, interval));
        Ok(())
    }

    fn delete_task(&mut self, task: T) -> Result<(), SchedulerError> {
        if let Some(e) = self.delete_error {
            return Err(e);
        }
        self.deleted.push(task);
        Ok(())
    }
}
