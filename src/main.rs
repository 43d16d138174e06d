#![no_main]
#![no_std]

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use defmt_rtt as _;
use panic_halt as _;

use hal::{pac, prelude::*};
use stm32f4xx_hal as hal;

use f429_supervisor::hw::{adc::Adc, pins::BoardPins, AlarmLine};
use f429_supervisor::supervisor::{Supervisor, SupervisorConfig};
use f429_supervisor::system::{Instant, Scheduler, SystemStatus, TaskId, MAX_TASKS};

static SYSTEM: SystemStatus = SystemStatus::new();
static MILLIS: AtomicU32 = AtomicU32::new(0);

defmt::timestamp!("{=u32}", MILLIS.load(Ordering::Relaxed));

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // Clocks: 8 MHz HSE -> 168 MHz
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.MHz()).sysclk(168.MHz()).freeze();

    // 1 kHz SysTick time base
    cp.SYST.set_clock_source(SystClkSource::Core);
    cp.SYST.set_reload(clocks.sysclk().raw() / 1_000 - 1);
    cp.SYST.clear_current();
    cp.SYST.enable_interrupt();
    cp.SYST.enable_counter();

    // Pins
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOG);
    let _supply_sense = pins.supply_sense;
    let alarm = AlarmLine::active_low(pins.alarm);

    // Services
    let mut adc = Adc::adc1(dp.ADC1);
    let mut scheduler: Scheduler<TaskId, MAX_TASKS> = Scheduler::new();

    // Application modules
    let mut supervisor = Supervisor::new(SupervisorConfig::default(), alarm, &SYSTEM);
    if let Err(e) = supervisor.init(&mut adc) {
        defmt::error!("supervisor init failed: {}", e);
    }
    if let Err(e) = supervisor.start(&mut scheduler) {
        defmt::error!("supervisor start failed: {}", e);
    }

    defmt::info!("main loop entered");

    loop {
        let now = Instant::from_ticks(MILLIS.load(Ordering::Relaxed));
        for task in scheduler.run_pending(now) {
            match task {
                TaskId::VoltageSupervisor => supervisor.run_task(&mut adc),
            }
        }

        adc.service(&mut supervisor);
    }
}

#[exception]
fn SysTick() {
    MILLIS.fetch_add(1, Ordering::Relaxed);
}
