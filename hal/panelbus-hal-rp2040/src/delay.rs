//! Cycle spin for the RP2040 cores

use panelbus_hal::{BusyWait, CalibratedDelay, SpinCalibration};

/// Spin on the Cortex-M0+ core
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleSpin;

impl BusyWait for CycleSpin {
    fn spin(&mut self, cycles: u32) {
        cortex_m::asm::delay(cycles);
    }
}

/// Delay used by the bus and touch drivers
pub type PlatformDelay = CalibratedDelay<CycleSpin>;

/// Create a delay calibrated against the running system clock
pub fn platform_delay(padding_cycles: u32) -> PlatformDelay {
    let calibration = SpinCalibration {
        cpu_hz: embassy_rp::clocks::clk_sys_freq(),
        padding_cycles,
    };
    CalibratedDelay::new(CycleSpin, calibration)
}
