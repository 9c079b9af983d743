//! XPT2046 / ADS7843 touch controller link
//!
//! The controller sits on a software-clocked serial link. Chip select is
//! owned by the caller and stays asserted across a whole conversion chain.
//!
//! # Framing
//!
//! A conversion starts with an 8-bit command on DIN, sampled by the chip on
//! each rising CLK edge. The result comes back on DOUT over the next 16
//! clocks, valid after each falling edge, MSB first, in the first 12 of
//! them. The next command overlaps clocks 9 to 16, so back-to-back
//! conversions cost 16 clocks each:
//!
//! ```text
//! clock   1 ........ 8 | 1 ......... 8 9 ........ 16 | 1 ...
//! DIN     [ command  ] | 0 0 0 0 0 0 0 0 [ next cmd ] | ...
//! DOUT                 | [     12-bit result    ] 0 0 0 0
//! ```
//!
//! # Command byte
//!
//! | Bit | 7 | 6-4     | 3    | 2   | 1-0       |
//! |-----|---|---------|------|-----|-----------|
//! |     | S | A2..A0  | MODE | SER | PD1..PD0  |

use embedded_hal::delay::DelayNs;
use panelbus_core::touch::RawSample;
use panelbus_hal::{InputPin, OutputPin};

/// Start bit
pub const START: u8 = 0x80;

/// Channel select: X position
pub const CHANNEL_X: u8 = 0x10;

/// Channel select: Y position
pub const CHANNEL_Y: u8 = 0x50;

/// Reference and ADC stay powered between conversions
pub const POWER_ON: u8 = 0x03;

/// Bits cleared to power down after the conversion
pub const POWER_DOWN_MASK: u8 = 0xF8;

/// Number of result bits
pub const RESULT_BITS: u8 = 12;

/// Clocks per conversion when commands overlap
pub const CLOCKS_PER_READ: u8 = 16;

/// Measurement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    X,
    Y,
}

impl Channel {
    /// 12-bit differential conversion, staying powered
    pub const fn command(self) -> u8 {
        match self {
            Channel::X => START | CHANNEL_X | POWER_ON,
            Channel::Y => START | CHANNEL_Y | POWER_ON,
        }
    }

    /// Same conversion, powering down afterwards
    pub const fn power_down(self) -> u8 {
        self.command() & POWER_DOWN_MASK
    }
}

/// Conversion-level access to the touch controller
pub trait TouchAdc {
    /// Drive idle line levels
    fn idle(&mut self);

    /// Send the first command of a chain
    fn write_command(&mut self, command: u8);

    /// Read one result while sending `next`
    fn read_data(&mut self, next: u8) -> RawSample;
}

/// Serial link timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkTiming {
    /// DIN setup before the rising edge
    pub setup_ns: u32,
    /// CLK high time
    pub clock_high_ns: u32,
    /// CLK low time after a command bit
    pub clock_low_ns: u32,
    /// Falling edge to DOUT valid
    pub sample_ns: u32,
}

impl Default for LinkTiming {
    fn default() -> Self {
        Self {
            setup_ns: 100,
            clock_high_ns: 200,
            clock_low_ns: 100,
            sample_ns: 200,
        }
    }
}

/// Bit-banged link over plain GPIOs
pub struct Xpt2046Link<CLK, DIN, DOUT, D> {
    clk: CLK,
    din: DIN,
    dout: DOUT,
    delay: D,
    timing: LinkTiming,
}

impl<CLK, DIN, DOUT, D> Xpt2046Link<CLK, DIN, DOUT, D>
where
    CLK: OutputPin,
    DIN: OutputPin,
    DOUT: InputPin,
    D: DelayNs,
{
    /// Create a link from its lines
    pub fn new(clk: CLK, din: DIN, dout: DOUT, delay: D, timing: LinkTiming) -> Self {
        Self {
            clk,
            din,
            dout,
            delay,
            timing,
        }
    }

    /// One clock with `bit` on DIN, leaving CLK low
    fn clock_out(&mut self, bit: bool) {
        self.din.set_state(bit);
        self.delay.delay_ns(self.timing.setup_ns);
        self.clk.set_high();
        self.delay.delay_ns(self.timing.clock_high_ns);
        self.clk.set_low();
    }
}

impl<CLK, DIN, DOUT, D> TouchAdc for Xpt2046Link<CLK, DIN, DOUT, D>
where
    CLK: OutputPin,
    DIN: OutputPin,
    DOUT: InputPin,
    D: DelayNs,
{
    fn idle(&mut self) {
        self.clk.set_low();
        self.din.set_high();
    }

    fn write_command(&mut self, command: u8) {
        let mut shift = command;
        for _ in 0..8 {
            self.clock_out(shift & 0x80 != 0);
            shift <<= 1;
            self.delay.delay_ns(self.timing.clock_low_ns);
        }
    }

    fn read_data(&mut self, next: u8) -> RawSample {
        // next command sits in the low byte and reaches bit 15 on clock 9
        let mut shift = next as u16;
        let mut data: RawSample = 0;

        for clock in 0..CLOCKS_PER_READ {
            self.clock_out(shift & 0x8000 != 0);
            shift <<= 1;
            if clock < RESULT_BITS {
                self.delay.delay_ns(self.timing.sample_ns);
                data <<= 1;
                if self.dout.is_high() {
                    data |= 1;
                }
            }
        }

        data
    }
}
