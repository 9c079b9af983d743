//! Board wiring
//!
//! Pin map for the reference carrier board:
//!
//! | Signal        | GPIO  |
//! |---------------|-------|
//! | D0-D7         | 0-7   |
//! | Latch enable  | 8     |
//! | RD            | 9     |
//! | WR            | 10    |
//! | D/~C          | 11    |
//! | LCD CS        | 12    |
//! | LCD RESET     | 13    |
//! | Backlight     | 14    |
//! | Touch DOUT    | 16    |
//! | Touch CS      | 17    |
//! | Touch CLK     | 18    |
//! | Touch DIN     | 19    |
//! | Touch PENIRQ  | 20    |

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;
use panelbus_core::config::{ConfigError, PanelConfig, TouchConfig};
use panelbus_core::touch::{OrientationFlags, RawBounds};
use panelbus_drivers::bus::{BusTiming, ParallelBus};
use panelbus_drivers::lcd::Ssd1963;
use panelbus_drivers::touch::{LinkTiming, TouchPanel, Xpt2046Link};
use panelbus_hal_rp2040::{platform_delay, GpioPort, PlatformDelay, RpInput, RpOutput};

/// Extra cycles on every bus spin, covers pad switching at 125 MHz
const SPIN_PADDING_CYCLES: u32 = 2;

type Out = RpOutput<'static>;
type In = RpInput<'static>;

pub type Bus = ParallelBus<Out, Out, Out, Out, GpioPort<'static>, PlatformDelay>;
pub type Lcd = Ssd1963<Bus, Out, Out, Out>;
pub type TouchLink = Xpt2046Link<Out, Out, In, PlatformDelay>;
pub type Touch = TouchPanel<TouchLink, Out, In, PlatformDelay>;

/// Raw extents measured on the reference panel, in oriented ADC space
pub const TOUCH_BOUNDS: RawBounds = RawBounds {
    x_low: 210,
    x_high: 3880,
    y_low: 310,
    y_high: 3760,
    margin: 0,
};

/// The digitizer is mounted with its Y axis running bottom to top
pub const TOUCH_ORIENTATION: OrientationFlags = OrientationFlags::REVERSE_Y;

pub fn panel_config() -> PanelConfig {
    PanelConfig::default()
}

pub fn touch_config() -> TouchConfig {
    TouchConfig {
        orientation: TOUCH_ORIENTATION,
        ..TouchConfig::default()
    }
}

/// Display bus and controller lines
pub struct LcdPins {
    /// D0 first
    pub data: [Peri<'static, AnyPin>; 8],
    pub latch: Peri<'static, AnyPin>,
    pub read: Peri<'static, AnyPin>,
    pub write: Peri<'static, AnyPin>,
    pub dc: Peri<'static, AnyPin>,
    pub cs: Peri<'static, AnyPin>,
    pub reset: Peri<'static, AnyPin>,
    pub backlight: Peri<'static, AnyPin>,
}

impl LcdPins {
    /// Configure every line at its idle level and build the driver
    pub fn into_driver(self, config: PanelConfig) -> Result<Lcd, ConfigError> {
        let port = GpioPort::new(self.data.map(|pin| RpOutput::new(pin, false)));

        let bus = ParallelBus::new(
            RpOutput::new(self.write, true),
            RpOutput::new(self.latch, false),
            RpOutput::new(self.cs, true),
            RpOutput::new(self.dc, true),
            port,
            platform_delay(SPIN_PADDING_CYCLES),
            BusTiming::default(),
        );

        Ssd1963::new(
            bus,
            RpOutput::new(self.reset, true),
            RpOutput::new(self.read, true),
            RpOutput::new(self.backlight, false),
            config,
        )
    }
}

/// Touch controller lines
pub struct TouchPins {
    pub dout: Peri<'static, AnyPin>,
    pub cs: Peri<'static, AnyPin>,
    pub clk: Peri<'static, AnyPin>,
    pub din: Peri<'static, AnyPin>,
    pub irq: Peri<'static, AnyPin>,
}

impl TouchPins {
    /// Configure the link and build the sampler
    pub fn into_driver(self, config: TouchConfig) -> Result<Touch, ConfigError> {
        let link = Xpt2046Link::new(
            RpOutput::new(self.clk, false),
            RpOutput::new(self.din, false),
            RpInput::new(self.dout),
            platform_delay(SPIN_PADDING_CYCLES),
            LinkTiming::default(),
        );

        TouchPanel::new(
            link,
            RpOutput::new(self.cs, true),
            RpInput::new_pull_up(self.irq),
            platform_delay(0),
            config,
        )
    }
}
