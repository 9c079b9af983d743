//! Flush target trait for rendered pixels

use crate::display::{FrameRegion, Rgb565};

/// Bus work done by one flush
///
/// A pixel equal to its predecessor in the row goes out as a bare
/// strobe (`repeated`) or is latched in full (`latched`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlushStats {
    /// Rows written
    pub rows: u32,
    /// Pixels written with a full latch and strobe
    pub latched: u32,
    /// Pixels written by strobe alone
    pub repeated: u32,
}

impl FlushStats {
    /// Total pixels written
    pub const fn pixels(&self) -> u32 {
        self.latched + self.repeated
    }
}

/// Something the GUI can flush rendered pixels into
pub trait FlushTarget {
    /// Panel size as (width, height)
    fn dimensions(&self) -> (u16, u16);

    /// Write `pixels` into `region`
    ///
    /// `pixels` covers the whole unclipped region in row-major order. Parts
    /// off the panel are skipped. `done` runs exactly once, after the last
    /// pixel, and also when nothing was visible.
    fn flush<F: FnOnce()>(&mut self, region: FrameRegion, pixels: &[Rgb565], done: F) -> FlushStats;
}
