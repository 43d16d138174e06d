// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Voltage Supervisor
//!
//! Monitors the 12V rail. A periodic task triggers ADC conversions, the results are averaged over
//! windows of [`filter::WINDOW_SIZE`] samples, and every completed window is checked against
//! undervoltage/overvoltage limits with hysteresis. Active conditions raise system warnings and
//! pull the alarm line.
//!
//! ## Modules
//!
//! - [`filter`] - Windowed averaging and ADC-to-voltage conversion.
//! - [`monitor`] - Hysteresis threshold state machine.
//!
//! ## Wiring
//!
//! ```ignore
//! let mut supervisor = Supervisor::new(SupervisorConfig::default(), alarm, &SYSTEM);
//! supervisor.init(&mut adc)?;
//! supervisor.start(&mut scheduler)?;
//!
//! loop {
//!     for task in scheduler.run_pending(now()) {
//!         match task {
//!             TaskId::VoltageSupervisor => supervisor.run_task(&mut adc),
//!         }
//!     }
//!     adc.service(&mut supervisor);
//! }
//! ```

pub mod filter;
pub mod monitor;

pub use filter::SampleFilter;
pub use monitor::{AlarmState, Evaluation, Thresholds, ThresholdMonitor, Transition};

use embedded_hal::digital::OutputPin;
use fugit::{ExtU32, MillisDurationU32};

use crate::error::Error;
use crate::hw::adc::{AdcChannel, AdcConfig, AdcListener, AdcResolution, AdcService};
use crate::hw::alarm::AlarmLine;
use crate::hw::gpio::{ConfigurePin, GpioConfig, OutputType};
use crate::system::scheduler::TaskScheduler;
use crate::system::status::{SystemError, SystemEvents, SystemWarning};
use crate::system::TaskId;

/// Open-drain, low speed, no pull.
pub const ALARM_PIN_CONFIG: GpioConfig = GpioConfig::output(OutputType::OpenDrain);

/// Supervisor settings. Start from [`Default`] and adjust with the `with_*` methods.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SupervisorConfig {
    pub channel: AdcChannel,
    pub resolution: AdcResolution,
    pub task_interval: MillisDurationU32,
    /// Supervised voltage at full-scale ADC code, 0.01 V units
    pub full_scale: u16,
    pub thresholds: Thresholds,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            channel: AdcChannel::new(3),
            resolution: AdcResolution::Bits12,
            task_interval: 100.millis(),
            full_scale: 2000,
            thresholds: Thresholds::default(),
        }
    }
}

impl SupervisorConfig {
    pub fn with_channel(mut self, channel: AdcChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Conversion resolution. Voltages are scaled to the full-scale code of `resolution`.
    pub fn with_resolution(mut self, resolution: AdcResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_task_interval(mut self, interval: MillisDurationU32) -> Self {
        self.task_interval = interval;
        self
    }

    pub fn with_full_scale(mut self, full_scale: u16) -> Self {
        self.full_scale = full_scale;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

/// Voltage supervisor instance.
///
/// `PIN` is the alarm output, `E` the system sink that receives warnings and errors.
pub struct Supervisor<PIN, E> {
    config: SupervisorConfig,
    filter: SampleFilter,
    monitor: ThresholdMonitor,
    alarm: AlarmLine<PIN>,
    events: E,
    initialised: bool,
    running: bool,
}

impl<PIN, E> Supervisor<PIN, E>
where
    PIN: OutputPin + ConfigurePin,
    E: SystemEvents,
{
    pub fn new(config: SupervisorConfig, alarm: AlarmLine<PIN>, events: E) -> Self {
        Self {
            config,
            filter: SampleFilter::new(config.full_scale).with_resolution(config.resolution),
            monitor: ThresholdMonitor::new(config.thresholds),
            alarm,
            events,
            initialised: false,
            running: false,
        }
    }

    /// Configure the ADC channel and the alarm pin. Not allowed while running.
    pub fn init(&mut self, adc: &mut impl AdcService) -> Result<(), Error> {
        if self.running {
            return Err(Error::InvalidAction);
        }

        adc.configure(&AdcConfig::new(self.config.channel, self.config.resolution))?;
        self.alarm.configure(&ALARM_PIN_CONFIG);
        self.initialised = true;
        debug!("supervisor initialised on channel {}", self.config.channel.number());
        Ok(())
    }

    /// Reset the measurement state and register the periodic task.
    pub fn start(&mut self, scheduler: &mut impl TaskScheduler<TaskId>) -> Result<(), Error> {
        if !self.initialised || self.running {
            return Err(Error::InvalidAction);
        }

        self.reset();
        scheduler.create_task(TaskId::VoltageSupervisor, self.config.task_interval)?;
        self.running = true;
        info!("supervisor started");
        Ok(())
    }

    /// Deregister the periodic task and reset the measurement state.
    ///
    /// The state is reset even if the scheduler reports an error.
    pub fn stop(&mut self, scheduler: &mut impl TaskScheduler<TaskId>) -> Result<(), Error> {
        if !self.initialised {
            return Err(Error::InvalidAction);
        }

        let result = scheduler.delete_task(TaskId::VoltageSupervisor);
        self.reset();
        self.running = false;
        info!("supervisor stopped");
        result.map_err(Error::from)
    }

    /// Periodic task body: request the next conversion.
    pub fn run_task(&mut self, adc: &mut impl AdcService) {
        if let Err(e) = adc.start_conversion(self.config.channel) {
            error!("supervisor conversion request failed: {}", e);
            self.events.raise_error(SystemError::SupervisorFailure);
        }
    }

    /// Latest averaged voltage in 0.01 V units.
    #[inline]
    pub fn voltage(&self) -> u16 {
        self.filter.voltage()
    }

    #[inline]
    pub fn alarm_state(&self) -> AlarmState {
        self.monitor.state()
    }

    #[inline]
    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    pub fn free(self) -> (AlarmLine<PIN>, E) {
        (self.alarm, self.events)
    }

    fn on_sample(&mut self, raw: u16) {
        if let Some(voltage) = self.filter.record(raw) {
            trace!("supervisor voltage {}", voltage);
            self.on_voltage(voltage);
        }
    }

    fn on_voltage(&mut self, voltage: u16) {
        let eval = self.monitor.update(voltage);

        match eval.undervoltage {
            Some(Transition::Raised) => {
                warn!("undervoltage: {} cV", voltage);
                self.events.raise_warning(SystemWarning::Undervoltage);
            }
            Some(Transition::Cleared) => self.events.clear_warning(SystemWarning::Undervoltage),
            None => {}
        }
        match eval.overvoltage {
            Some(Transition::Raised) => {
                warn!("overvoltage: {} cV", voltage);
                self.events.raise_warning(SystemWarning::Overvoltage);
            }
            Some(Transition::Cleared) => self.events.clear_warning(SystemWarning::Overvoltage),
            None => {}
        }

        if eval.alarm_changed() {
            self.alarm.set(eval.state.any());
        }
    }

    /// Zero the accumulator and voltage, and release any active condition.
    fn reset(&mut self) {
        let state = self.monitor.state();
        if state.undervoltage {
            self.events.clear_warning(SystemWarning::Undervoltage);
        }
        if state.overvoltage {
            self.events.clear_warning(SystemWarning::Overvoltage);
        }
        if state.any() {
            self.alarm.set(false);
        }

        self.filter.reset();
        self.monitor.reset();
    }
}

impl<PIN, E> AdcListener for Supervisor<PIN, E>
where
    PIN: OutputPin + ConfigurePin,
    E: SystemEvents,
{
    /// Results for other channels, and results arriving while stopped, are dropped.
    fn on_conversion(&mut self, channel: AdcChannel, raw: u16) {
        if channel != self.config.channel || !self.running {
            return;
        }
        self.on_sample(raw);
    }
}
