//! Configuration types
//!
//! Board-agnostic panel and digitizer settings. Every field has the value
//! the reference 800x480 module ships with, so `Default` brings a board up.

pub mod panel;
pub mod touch;

pub use panel::*;
pub use touch::*;

/// Errors found while validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width or height is zero
    ZeroDimension,
    /// Resolution exceeds what the controller can address
    ResolutionTooLarge,
    /// Pixel clock divisor does not fit the 20-bit register
    PixelClockRange,
    /// Denoise ring has no slots
    RingTooSmall,
    /// A power-up wait is below the controller minimum
    DelayTooShort,
    /// Power-up sequence does not fit its fixed-capacity buffer
    SequenceOverflow,
}
