//! Eight-line data port

use embassy_rp::gpio::{Level, Output};
use panelbus_hal::ParallelPort;

use crate::gpio::RpOutput;

/// Data port made of eight independent outputs, D0 first
///
/// Lines are written one after another, so they settle within a few cycles
/// of each other rather than together. The latch setup spin starts after the
/// last line.
// TODO: drive the lines with one masked SIO write once the data pins are
// guaranteed contiguous on every supported board.
pub struct GpioPort<'d> {
    lines: [Output<'d>; 8],
}

impl<'d> GpioPort<'d> {
    /// Build a port from eight outputs, D0 first
    pub fn new(lines: [RpOutput<'d>; 8]) -> Self {
        Self {
            lines: lines.map(RpOutput::into_inner),
        }
    }
}

impl ParallelPort for GpioPort<'_> {
    fn write(&mut self, value: u8) {
        for (bit, line) in self.lines.iter_mut().enumerate() {
            line.set_level(Level::from(value & (1 << bit) != 0));
        }
    }
}
