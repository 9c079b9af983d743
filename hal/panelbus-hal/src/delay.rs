//! Calibrated busy-wait delays
//!
//! Bus setup and hold times are tens of nanoseconds, far below any timer or
//! interrupt granularity, so they are met by spinning the CPU. A target only
//! has to provide a raw cycle spin ([`BusyWait`]); [`CalibratedDelay`] turns
//! it into an `embedded_hal` [`DelayNs`] using the core clock frequency.

use embedded_hal::delay::DelayNs;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Cycle-counted spin
pub trait BusyWait {
    /// Block for at least `cycles` CPU cycles
    fn spin(&mut self, cycles: u32);
}

/// Conversion from wall time to spin cycles for one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinCalibration {
    /// Core clock in Hz
    pub cpu_hz: u32,
    /// Cycles added to every non-zero wait
    ///
    /// Covers the gap between a GPIO register write and the pad actually
    /// switching. Tune per board with a scope on the strobe line.
    pub padding_cycles: u32,
}

impl Default for SpinCalibration {
    fn default() -> Self {
        Self {
            cpu_hz: 125_000_000, // RP2040 default system clock
            padding_cycles: 0,
        }
    }
}

impl SpinCalibration {
    /// Create a calibration for the given core clock
    pub const fn new(cpu_hz: u32) -> Self {
        Self {
            cpu_hz,
            padding_cycles: 0,
        }
    }

    /// Cycles needed to cover `ns` nanoseconds, rounded up
    pub const fn cycles_for_ns(&self, ns: u32) -> u32 {
        if ns == 0 {
            return 0;
        }
        let scaled = (ns as u64).saturating_mul(self.cpu_hz as u64);
        let cycles = scaled.div_ceil(NANOS_PER_SECOND);
        let total = cycles.saturating_add(self.padding_cycles as u64);
        if total > u32::MAX as u64 {
            u32::MAX
        } else {
            total as u32
        }
    }
}

/// Platform delay built from a cycle spin
pub struct CalibratedDelay<W> {
    wait: W,
    calibration: SpinCalibration,
}

impl<W: BusyWait> CalibratedDelay<W> {
    /// Wrap a spin with a calibration
    pub fn new(wait: W, calibration: SpinCalibration) -> Self {
        Self { wait, calibration }
    }

    /// Get the calibration
    pub fn calibration(&self) -> &SpinCalibration {
        &self.calibration
    }

    /// Release the underlying spin
    pub fn release(self) -> W {
        self.wait
    }
}

impl<W: BusyWait> DelayNs for CalibratedDelay<W> {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = self.calibration.cycles_for_ns(ns);
        if cycles > 0 {
            self.wait.spin(cycles);
        }
    }
}
