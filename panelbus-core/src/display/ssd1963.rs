//! SSD1963 command set and power-up sequence
//!
//! The controller is brought up by a fixed list of command writes and waits.
//! The list is built here from a [`PanelConfig`] so the driver just walks it
//! and tests can check it byte for byte without a bus.

use heapless::Vec;

use super::region::FrameRegion;
use super::Rgb565;
use crate::config::{ConfigError, PanelConfig, SyncTiming};

/// Command opcodes
pub mod cmd {
    pub const SOFT_RESET: u8 = 0x01;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const SET_COLUMN_ADDRESS: u8 = 0x2A;
    pub const SET_PAGE_ADDRESS: u8 = 0x2B;
    pub const WRITE_MEMORY_START: u8 = 0x2C;
    pub const SET_LCD_MODE: u8 = 0xB0;
    pub const SET_HORI_PERIOD: u8 = 0xB4;
    pub const SET_VERT_PERIOD: u8 = 0xB6;
    pub const SET_GPIO_CONF: u8 = 0xB8;
    pub const SET_GPIO_VALUE: u8 = 0xBA;
    pub const SET_PWM_CONF: u8 = 0xBE;
    pub const SET_DBC_CONF: u8 = 0xD0;
    pub const SET_PLL: u8 = 0xE0;
    pub const SET_PLL_MN: u8 = 0xE2;
    pub const SET_LSHIFT_FREQ: u8 = 0xE6;
    pub const SET_PIXEL_DATA_INTERFACE: u8 = 0xF0;
}

/// `SET_PLL` argument: enable, still on the crystal
pub const PLL_ENABLE: u8 = 0x01;

/// `SET_PLL` argument: enable and lock onto the PLL output
pub const PLL_LOCK: u8 = 0x03;

/// `SET_PLL_MN` third argument: apply the new values
pub const PLL_APPLY: u8 = 0x04;

/// `SET_PIXEL_DATA_INTERFACE` argument: 16-bit bus, RGB565
pub const PIXEL_FORMAT_565: u8 = 0x03;

/// `SET_PWM_CONF` enable flag: PWM controlled by the host
pub const PWM_HOST_CONTROLLED: u8 = 0x01;

/// `SET_PWM_CONF` prescaler
pub const PWM_PRESCALER: u8 = 0x00;

/// GPIO0 used as a plain output
pub const GPIO0_NORMAL: u8 = 0x01;

/// Longest argument list of any command used here
pub const MAX_ARGS: usize = 8;

/// Upper bound on power-up steps
pub const MAX_INIT_STEPS: usize = 24;

/// Command argument bytes
pub type CommandArgs = Vec<u8, MAX_ARGS>;

/// One step of the power-up sequence
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStep {
    /// Write a command followed by its arguments
    Command { cmd: u8, args: CommandArgs },
    /// Wait
    DelayMs(u32),
    /// Fill the whole frame buffer with one colour
    Fill { colour: Rgb565 },
}

/// Power-up sequence
pub type InitSequence = Vec<InitStep, MAX_INIT_STEPS>;

struct SequenceBuilder {
    steps: InitSequence,
}

impl SequenceBuilder {
    fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn push(&mut self, step: InitStep) -> Result<(), ConfigError> {
        self.steps
            .push(step)
            .map_err(|_| ConfigError::SequenceOverflow)
    }

    fn command(&mut self, cmd: u8, args: &[u8]) -> Result<(), ConfigError> {
        let args = CommandArgs::from_slice(args).map_err(|_| ConfigError::SequenceOverflow)?;
        self.push(InitStep::Command { cmd, args })
    }

    fn delay(&mut self, ms: u32) -> Result<(), ConfigError> {
        self.push(InitStep::DelayMs(ms))
    }

    fn finish(self) -> InitSequence {
        self.steps
    }
}

/// Split a value into its big-endian bytes
pub const fn be16(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Arguments of a column or page address command for `start..=end`
pub const fn address_args(start: u16, end: u16) -> [u8; 4] {
    let s = start.to_be_bytes();
    let e = end.to_be_bytes();
    [s[0], s[1], e[0], e[1]]
}

/// Column and page arguments addressing a clipped region
///
/// The region must already be clipped to the panel.
pub fn window_args(area: &FrameRegion) -> ([u8; 4], [u8; 4]) {
    (
        address_args(area.x1 as u16, area.x2 as u16),
        address_args(area.y1 as u16, area.y2 as u16),
    )
}

fn horizontal_args(t: &SyncTiming) -> [u8; 8] {
    let total = be16(t.total);
    let non_display = be16(t.non_display);
    let position = be16(t.pulse_position);
    [
        total[0],
        total[1],
        non_display[0],
        non_display[1],
        t.pulse_width,
        position[0],
        position[1],
        0x00,
    ]
}

fn vertical_args(t: &SyncTiming) -> [u8; 7] {
    let total = be16(t.total);
    let non_display = be16(t.non_display);
    let position = be16(t.pulse_position);
    [
        total[0],
        total[1],
        non_display[0],
        non_display[1],
        t.pulse_width,
        position[0],
        position[1],
    ]
}

/// Build the power-up sequence for a panel
///
/// Starts after the hardware reset pulse and ends with the dynamic backlight
/// setup. The caller releases chip select and switches the backlight on
/// after [`PowerUpTiming::backlight_on_ms`](crate::config::PowerUpTiming).
pub fn init_sequence(config: &PanelConfig) -> Result<InitSequence, ConfigError> {
    config.validate()?;

    let mut seq = SequenceBuilder::new();

    seq.command(
        cmd::SET_PLL_MN,
        &[config.pll.multiplier, config.pll.divider, PLL_APPLY],
    )?;
    seq.command(cmd::SET_PLL, &[PLL_ENABLE])?;
    seq.delay(config.pll.lock_ms)?;
    seq.command(cmd::SET_PLL, &[PLL_LOCK])?;
    seq.delay(config.pll.lock_ms)?;
    seq.command(cmd::SOFT_RESET, &[])?;
    seq.delay(config.timing.soft_reset_ms)?;

    let fpr = config.pixel_clock.to_be_bytes();
    seq.command(cmd::SET_LSHIFT_FREQ, &fpr[1..])?;

    let hdp = be16(config.width - 1);
    let vdp = be16(config.height - 1);
    seq.command(
        cmd::SET_LCD_MODE,
        &[
            config.depth.mode_byte(),
            0x00,
            hdp[0],
            hdp[1],
            vdp[0],
            vdp[1],
            0x00,
        ],
    )?;
    seq.command(cmd::SET_HORI_PERIOD, &horizontal_args(&config.horizontal))?;
    seq.command(cmd::SET_VERT_PERIOD, &vertical_args(&config.vertical))?;
    seq.command(cmd::SET_GPIO_VALUE, &[config.gpio_levels])?;
    seq.command(cmd::SET_GPIO_CONF, &[config.gpio_direction, GPIO0_NORMAL])?;
    seq.command(cmd::SET_PIXEL_DATA_INTERFACE, &[PIXEL_FORMAT_565])?;
    seq.delay(config.timing.interface_ms)?;

    if let Some(colour) = config.clear_colour {
        seq.push(InitStep::Fill { colour })?;
    }

    seq.command(cmd::DISPLAY_ON, &[])?;

    let bl = &config.backlight;
    seq.command(
        cmd::SET_PWM_CONF,
        &[
            bl.pwm_divisor,
            bl.duty,
            PWM_HOST_CONTROLLED,
            bl.brightness,
            bl.min_brightness,
            PWM_PRESCALER,
        ],
    )?;
    seq.command(cmd::SET_DBC_CONF, &[bl.dynamic_control])?;

    Ok(seq.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(cmd: u8, args: &[u8]) -> InitStep {
        InitStep::Command {
            cmd,
            args: CommandArgs::from_slice(args).unwrap(),
        }
    }

    #[test]
    fn test_default_sequence_bytes() {
        let seq = init_sequence(&PanelConfig::default()).unwrap();

        let expected = [
            command(0xE2, &[0x1D, 0x22, 0x04]),
            command(0xE0, &[0x01]),
            InitStep::DelayMs(10),
            command(0xE0, &[0x03]),
            InitStep::DelayMs(10),
            command(0x01, &[]),
            InitStep::DelayMs(100),
            command(0xE6, &[0x03, 0xFF, 0xFF]),
            command(0xB0, &[0x20, 0x00, 0x03, 0x1F, 0x01, 0xDF, 0x00]),
            command(0xB4, &[0x03, 0xA0, 0x00, 0x2E, 0x30, 0x00, 0x0F, 0x00]),
            command(0xB6, &[0x02, 0x0D, 0x00, 0x10, 0x10, 0x00, 0x08]),
            command(0xBA, &[0x0F]),
            command(0xB8, &[0x07, 0x01]),
            command(0xF0, &[0x03]),
            InitStep::DelayMs(1),
            InitStep::Fill { colour: 0x0000 },
            command(0x29, &[]),
            command(0xBE, &[0x06, 0xF0, 0x01, 0xF0, 0x00, 0x00]),
            command(0xD0, &[0x0D]),
        ];

        assert_eq!(seq.as_slice(), &expected[..]);
    }

    #[test]
    fn test_no_fill_without_clear_colour() {
        let config = PanelConfig {
            clear_colour: None,
            ..Default::default()
        };
        let seq = init_sequence(&config).unwrap();

        assert!(!seq.iter().any(|s| matches!(s, InitStep::Fill { .. })));
        assert_eq!(seq.len(), 18);
    }

    #[test]
    fn test_18_bit_panel_mode() {
        let config = PanelConfig {
            depth: crate::config::PanelDepth::Bits18,
            width: 480,
            height: 272,
            ..Default::default()
        };
        let seq = init_sequence(&config).unwrap();

        assert_eq!(
            seq[8],
            command(0xB0, &[0x00, 0x00, 0x01, 0xDF, 0x01, 0x0F, 0x00])
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PanelConfig {
            width: 0,
            ..Default::default()
        };
        assert_eq!(init_sequence(&config), Err(ConfigError::ZeroDimension));
    }

    #[test]
    fn test_shortened_waits_never_reach_sequence() {
        let config = PanelConfig {
            pll: crate::config::PllConfig {
                lock_ms: 0,
                ..Default::default()
            },
            timing: crate::config::PowerUpTiming {
                reset_ms: 0,
                soft_reset_ms: 0,
                interface_ms: 0,
                backlight_on_ms: 0,
            },
            ..Default::default()
        };
        assert_eq!(init_sequence(&config), Err(ConfigError::DelayTooShort));
    }

    #[test]
    fn test_window_args() {
        let (cols, pages) = window_args(&FrameRegion::new(16, 300, 799, 479));
        assert_eq!(cols, [0x00, 0x10, 0x03, 0x1F]);
        assert_eq!(pages, [0x01, 0x2C, 0x01, 0xDF]);
    }
}
