//! Touch-side logic: orientation, calibration, denoising
//!
//! Raw digitizer values are 12-bit. A raw pair goes through orientation
//! first (swap, then mirror) and calibration second, so calibration bounds
//! are always given in oriented raw space.

pub mod denoise;
pub mod mapper;
pub mod orientation;

pub use denoise::{denoise, Convergence, DenoiseParams, DenoiseRing, DEFAULT_RING_LEN};
pub use mapper::{
    apply_calibration, CalibrationError, CalibrationProfile, CoordinateMapper, MappedTouch,
    RawBounds,
};
pub use orientation::{apply_orientation, OrientationFlags};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest raw conversion value
pub const ADC_MAX: u16 = 4095;

/// Single unfiltered 12-bit conversion
pub type RawSample = u16;

/// Settled value of one axis
pub type FilteredSample = u16;

/// Raw coordinate pair after orientation, before calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawPoint {
    pub x: u16,
    pub y: u16,
}

/// Pointer state handed to the GUI each poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchEvent {
    /// Panel is being touched
    pub pressed: bool,
    /// Screen column
    pub x: u16,
    /// Screen row
    pub y: u16,
    /// A press was also seen on the previous poll
    pub repeat: bool,
}

impl TouchEvent {
    /// Nothing touching the panel
    pub const fn released() -> Self {
        Self {
            pressed: false,
            x: 0,
            y: 0,
            repeat: false,
        }
    }

    /// Press at a screen position
    pub const fn pressed_at(x: u16, y: u16, repeat: bool) -> Self {
        Self {
            pressed: true,
            x,
            y,
            repeat,
        }
    }
}
