//! GUI time base
//!
//! The GUI library keeps its own millisecond clock and needs to be told how
//! much time passed. A periodic task advances the counter, everything else
//! reads it.

/// Period of the GUI tick
pub const TICK_PERIOD_MS: u32 = 5;

/// Wrapping millisecond counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickCounter {
    now_ms: u32,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self { now_ms: 0 }
    }

    /// Advance by `elapsed_ms`
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(elapsed_ms);
    }

    /// Milliseconds since start, modulo 2^32
    pub const fn now_ms(&self) -> u32 {
        self.now_ms
    }

    /// Milliseconds since `earlier`, correct across one wrap
    pub const fn elapsed_since(&self, earlier: u32) -> u32 {
        self.now_ms.wrapping_sub(earlier)
    }
}
