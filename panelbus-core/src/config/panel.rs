//! SSD1963 panel configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Widest line the controller's frame buffer holds
pub const MAX_WIDTH: u16 = 864;

/// Tallest frame the controller's frame buffer holds
pub const MAX_HEIGHT: u16 = 480;

/// Largest value of the 20-bit pixel clock divisor
pub const MAX_PIXEL_CLOCK: u32 = 0x000F_FFFF;

/// Shortest hold for each phase of the hardware reset pulse
pub const MIN_RESET_MS: u32 = 15;

/// Shortest wait after enabling and after locking the PLL
pub const MIN_PLL_LOCK_MS: u32 = 10;

/// Shortest wait after the soft reset command
pub const MIN_SOFT_RESET_MS: u32 = 100;

/// Shortest wait after selecting the pixel data interface
pub const MIN_INTERFACE_MS: u32 = 1;

/// Shortest wait between display on and backlight on
pub const MIN_BACKLIGHT_ON_MS: u32 = 1000;

/// Panel data width on the RGB side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PanelDepth {
    /// 24-bit TFT
    #[default]
    Bits24,
    /// 18-bit TFT
    Bits18,
}

impl PanelDepth {
    /// First argument of the LCD mode command
    pub const fn mode_byte(self) -> u8 {
        match self {
            PanelDepth::Bits24 => 0x20,
            PanelDepth::Bits18 => 0x00,
        }
    }
}

/// PLL register values (raw, written as-is)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PllConfig {
    /// Multiplier register (M)
    pub multiplier: u8,
    /// Divider register (N)
    pub divider: u8,
    /// Wait after enabling and after locking the PLL
    pub lock_ms: u32,
}

impl Default for PllConfig {
    fn default() -> Self {
        Self {
            multiplier: 0x1D,
            divider: 0x22,
            lock_ms: MIN_PLL_LOCK_MS,
        }
    }
}

/// One axis of the panel sync timing, in pixel clocks or lines
///
/// Values are register values and go to the controller unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SyncTiming {
    /// Total period
    pub total: u16,
    /// Non-display period before the active area
    pub non_display: u16,
    /// Sync pulse width
    pub pulse_width: u8,
    /// Sync pulse start position
    pub pulse_position: u16,
}

impl SyncTiming {
    /// Horizontal timing of the 800x480 reference panel
    pub const fn horizontal_default() -> Self {
        Self {
            total: 928,
            non_display: 46,
            pulse_width: 48,
            pulse_position: 15,
        }
    }

    /// Vertical timing of the 800x480 reference panel
    pub const fn vertical_default() -> Self {
        Self {
            total: 525,
            non_display: 16,
            pulse_width: 16,
            pulse_position: 8,
        }
    }
}

/// Controller PWM backlight settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BacklightConfig {
    /// PWM frequency divisor
    pub pwm_divisor: u8,
    /// PWM duty cycle
    pub duty: u8,
    /// Brightness level
    pub brightness: u8,
    /// Lowest level dynamic control may reach
    pub min_brightness: u8,
    /// Dynamic backlight control register
    pub dynamic_control: u8,
}

impl Default for BacklightConfig {
    fn default() -> Self {
        Self {
            pwm_divisor: 0x06,
            duty: 0xF0,
            brightness: 0xF0,
            min_brightness: 0x00,
            dynamic_control: 0x0D,
        }
    }
}

/// Waits in the power-up sequence
///
/// Values may be lengthened but never shortened below the controller's
/// power-up minimums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerUpTiming {
    /// Each phase of the hardware reset pulse
    pub reset_ms: u32,
    /// After the soft reset command
    pub soft_reset_ms: u32,
    /// After selecting the pixel data interface
    pub interface_ms: u32,
    /// Between display on and backlight on
    pub backlight_on_ms: u32,
}

impl PowerUpTiming {
    /// Check every wait against its minimum
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reset_ms < MIN_RESET_MS
            || self.soft_reset_ms < MIN_SOFT_RESET_MS
            || self.interface_ms < MIN_INTERFACE_MS
            || self.backlight_on_ms < MIN_BACKLIGHT_ON_MS
        {
            return Err(ConfigError::DelayTooShort);
        }
        Ok(())
    }
}

impl Default for PowerUpTiming {
    fn default() -> Self {
        Self {
            reset_ms: MIN_RESET_MS,
            soft_reset_ms: MIN_SOFT_RESET_MS,
            interface_ms: MIN_INTERFACE_MS,
            backlight_on_ms: MIN_BACKLIGHT_ON_MS,
        }
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Horizontal resolution
    pub width: u16,
    /// Vertical resolution
    pub height: u16,
    /// RGB side data width
    pub depth: PanelDepth,
    /// PLL setup
    pub pll: PllConfig,
    /// Pixel clock divisor (20 bits)
    pub pixel_clock: u32,
    /// Horizontal sync timing
    pub horizontal: SyncTiming,
    /// Vertical sync timing
    pub vertical: SyncTiming,
    /// Controller GPIO direction bits
    pub gpio_direction: u8,
    /// Controller GPIO output levels
    pub gpio_levels: u8,
    /// Fill the frame buffer with this colour before display on
    pub clear_colour: Option<u16>,
    /// Backlight PWM
    pub backlight: BacklightConfig,
    /// Power-up waits
    pub timing: PowerUpTiming,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            depth: PanelDepth::Bits24,
            pll: PllConfig::default(),
            pixel_clock: 0x0003_FFFF,
            horizontal: SyncTiming::horizontal_default(),
            vertical: SyncTiming::vertical_default(),
            gpio_direction: 0x07,
            gpio_levels: 0x0F,
            clear_colour: Some(0x0000),
            backlight: BacklightConfig::default(),
            timing: PowerUpTiming::default(),
        }
    }
}

impl PanelConfig {
    /// Check the configuration against controller limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.width > MAX_WIDTH || self.height > MAX_HEIGHT {
            return Err(ConfigError::ResolutionTooLarge);
        }
        if self.pixel_clock > MAX_PIXEL_CLOCK {
            return Err(ConfigError::PixelClockRange);
        }
        if self.pll.lock_ms < MIN_PLL_LOCK_MS {
            return Err(ConfigError::DelayTooShort);
        }
        self.timing.validate()
    }

    /// Number of pixels in one full frame
    pub const fn pixel_count(&self) -> u32 {
        self.width as u32 * self.height as u32
    }
}
