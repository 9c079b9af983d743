//! Latched 8-bit parallel bus
//!
//! The SSD1963 runs a 16-bit 8080-style data bus, but only eight GPIOs carry
//! data. A transparent latch (74HC573) holds the low byte while the same
//! lines then carry the high byte:
//!
//! ```text
//! LE   __/‾‾‾‾\________________
//! D    ==<low >==<high     >===
//! WR   ‾‾‾‾‾‾‾‾‾‾‾‾‾‾\___/‾‾‾‾‾
//! ```
//!
//! The controller samples on the rising edge of WR, so a pixel equal to the
//! one before it needs only another WR pulse.
//!
//! Timing limits (3.3 V):
//! - WR low time >= 12 ns (SSD1963)
//! - Data setup to trailing edge of LE >= 13 ns (74HC573)
//! - Latch hold time 5 ns, covered by the port write that follows
//!
//! Nothing on the bus can detect a violated timing. Too-short spins show up
//! as corrupted pixels only.

use embedded_hal::delay::DelayNs;
use panelbus_hal::{ConfigurableDrive, DriveStrength, OutputPin, ParallelPort};

/// Bus timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusTiming {
    /// WR low time
    pub strobe_low_ns: u32,
    /// Data setup before the latch closes
    pub latch_setup_ns: u32,
    /// Pad drive for the WR and latch lines
    pub strobe_drive: DriveStrength,
}

impl Default for BusTiming {
    fn default() -> Self {
        Self {
            strobe_low_ns: 12,
            latch_setup_ns: 13,
            strobe_drive: DriveStrength::Ma8,
        }
    }
}

/// Write-only LCD bus
///
/// Callers own chip select: every method except [`select`](Self::select)
/// assumes CS is already asserted.
pub trait LcdBus {
    /// Drive idle levels and set pad drive strengths
    fn prepare(&mut self);

    /// Assert (`true`) or release chip select
    fn select(&mut self, selected: bool);

    /// Drive D/~C: `true` for data, `false` for command
    fn set_data_mode(&mut self, data: bool);

    /// Latch a byte onto the low data lines and strobe it in
    fn write_latched_byte(&mut self, value: u8);

    /// Write a 16-bit word: low byte via the latch, high byte direct
    fn write_word(&mut self, value: u16);

    /// Pulse WR, re-writing whatever the bus already holds
    fn pulse_strobe(&mut self);

    /// Millisecond wait for power-up sequencing
    fn delay_ms(&mut self, ms: u32);

    /// Send a command byte
    fn write_command(&mut self, cmd: u8) {
        self.set_data_mode(false);
        self.write_latched_byte(cmd);
    }

    /// Send command argument bytes
    fn write_args(&mut self, args: &[u8]) {
        self.set_data_mode(true);
        for &byte in args {
            self.write_latched_byte(byte);
        }
    }
}

/// GPIO implementation of [`LcdBus`]
pub struct ParallelBus<WR, LE, CS, DC, PORT, D> {
    wr: WR,
    latch: LE,
    cs: CS,
    dc: DC,
    port: PORT,
    delay: D,
    timing: BusTiming,
}

impl<WR, LE, CS, DC, PORT, D> ParallelBus<WR, LE, CS, DC, PORT, D>
where
    WR: OutputPin + ConfigurableDrive,
    LE: OutputPin + ConfigurableDrive,
    CS: OutputPin,
    DC: OutputPin,
    PORT: ParallelPort,
    D: DelayNs,
{
    /// Create a bus from its lines
    pub fn new(wr: WR, latch: LE, cs: CS, dc: DC, port: PORT, delay: D, timing: BusTiming) -> Self {
        Self {
            wr,
            latch,
            cs,
            dc,
            port,
            delay,
            timing,
        }
    }

    /// Get the timing
    pub fn timing(&self) -> &BusTiming {
        &self.timing
    }
}

impl<WR, LE, CS, DC, PORT, D> LcdBus for ParallelBus<WR, LE, CS, DC, PORT, D>
where
    WR: OutputPin + ConfigurableDrive,
    LE: OutputPin + ConfigurableDrive,
    CS: OutputPin,
    DC: OutputPin,
    PORT: ParallelPort,
    D: DelayNs,
{
    fn prepare(&mut self) {
        self.cs.set_high();
        self.dc.set_high();
        self.wr.set_high();
        self.wr.set_drive_strength(self.timing.strobe_drive);
        self.latch.set_low();
        self.latch.set_drive_strength(self.timing.strobe_drive);
        self.port.write(0);
    }

    fn select(&mut self, selected: bool) {
        self.cs.set_state(!selected);
    }

    fn set_data_mode(&mut self, data: bool) {
        self.dc.set_state(data);
    }

    fn write_latched_byte(&mut self, value: u8) {
        self.latch.set_high();
        self.port.write(value);
        self.delay.delay_ns(self.timing.latch_setup_ns);
        self.latch.set_low();
        self.pulse_strobe();
    }

    fn write_word(&mut self, value: u16) {
        let [high, low] = value.to_be_bytes();
        self.latch.set_high();
        self.port.write(low);
        self.delay.delay_ns(self.timing.latch_setup_ns);
        self.latch.set_low();
        self.port.write(high);
        self.pulse_strobe();
    }

    fn pulse_strobe(&mut self) {
        self.wr.set_low();
        self.delay.delay_ns(self.timing.strobe_low_ns);
        self.wr.set_high();
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
