//! Parallel data port
//!
//! The display bus carries 16-bit pixels over eight GPIO lines: the low byte
//! is parked in an external transparent latch, then the high byte is driven
//! directly before the write strobe.

/// Eight data lines driven together
pub trait ParallelPort {
    /// Drive the eight lines to the bits of `value`
    ///
    /// Bit 0 goes to the lowest line. All eight lines must settle before the
    /// call returns, so callers can time setup intervals from that point.
    fn write(&mut self, value: u8);
}
