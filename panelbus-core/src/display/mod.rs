//! Display-side logic: regions, pixels and the SSD1963 command set

pub mod region;
pub mod ssd1963;

pub use region::{FlushWindow, FrameRegion};
pub use ssd1963::{init_sequence, InitSequence, InitStep};

/// 16-bit RGB565 pixel as streamed to the controller
pub type Rgb565 = u16;

/// Common RGB565 colours
pub mod colour {
    use super::Rgb565;

    pub const BLACK: Rgb565 = 0x0000;
    pub const WHITE: Rgb565 = 0xFFFF;
    pub const RED: Rgb565 = 0xF800;
    pub const GREEN: Rgb565 = 0x07E0;
    pub const BLUE: Rgb565 = 0x001F;
    pub const YELLOW: Rgb565 = 0xFFE0;
    pub const CYAN: Rgb565 = 0x07FF;
    pub const MAGENTA: Rgb565 = 0xF81F;
}

/// Pack 8-bit channels into RGB565
pub const fn rgb565(r: u8, g: u8, b: u8) -> Rgb565 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}
