//! Raw-to-screen coordinate mapping
//!
//! Calibration is 16.16 fixed point with truncation:
//! `screen = ((raw * scale) >> 16) - offset`, clamped to the display.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::orientation::{apply_orientation, OrientationFlags};
use super::{RawPoint, ADC_MAX};

/// Errors from deriving a calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// High raw bound is not above the low one
    EmptyRange,
    /// Margins leave no room on the display
    MarginTooLarge,
    /// Raw span is too narrow for the 16-bit scale
    RangeTooNarrow,
    /// A raw bound lies above the 12-bit conversion range
    OutOfRange,
}

/// Per-axis scale and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationProfile {
    pub scale_x: u16,
    pub scale_y: u16,
    pub offset_x: i16,
    pub offset_y: i16,
}

impl CalibrationProfile {
    /// Linear map of the full raw range onto the display
    pub fn full_range(width: u16, height: u16) -> Self {
        Self {
            scale_x: full_range_scale(width),
            scale_y: full_range_scale(height),
            offset_x: 0,
            offset_y: 0,
        }
    }
}

fn full_range_scale(dimension: u16) -> u16 {
    let scale = ((dimension.saturating_sub(1) as u32) << 16) / ADC_MAX as u32;
    scale.min(u16::MAX as u32) as u16
}

/// Map one oriented raw value onto a display axis
pub fn apply_calibration(value: u16, scale: u16, offset: i16, dimension: u16) -> u16 {
    let scaled = ((value as u32 * scale as u32) >> 16) as i32 - offset as i32;
    scaled.clamp(0, dimension.saturating_sub(1) as i32) as u16
}

/// Raw values observed at the calibration targets, in oriented raw space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawBounds {
    pub x_low: u16,
    pub x_high: u16,
    pub y_low: u16,
    pub y_high: u16,
    /// Distance of the targets from the display edge, in pixels
    pub margin: u16,
}

fn calibrate_axis(
    low: u16,
    high: u16,
    margin: u16,
    dimension: u16,
) -> Result<(u16, i16), CalibrationError> {
    if high > ADC_MAX {
        return Err(CalibrationError::OutOfRange);
    }
    if high <= low {
        return Err(CalibrationError::EmptyRange);
    }

    let span = dimension as i32 - 1 - 2 * margin as i32;
    if span <= 0 {
        return Err(CalibrationError::MarginTooLarge);
    }

    let scale = ((span as u32) << 16) / (high - low) as u32;
    if scale > u16::MAX as u32 {
        return Err(CalibrationError::RangeTooNarrow);
    }

    let offset = ((low as u32 * scale) >> 16) as i32 - margin as i32;
    let offset = i16::try_from(offset).map_err(|_| CalibrationError::OutOfRange)?;
    Ok((scale as u16, offset))
}

/// Screen position plus the oriented raw pair it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MappedTouch {
    pub x: u16,
    pub y: u16,
    pub raw: RawPoint,
}

/// Orientation plus calibration for one display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoordinateMapper {
    width: u16,
    height: u16,
    orientation: OrientationFlags,
    profile: CalibrationProfile,
}

impl CoordinateMapper {
    /// Create a mapper with the full-range calibration
    pub fn new(width: u16, height: u16, orientation: OrientationFlags) -> Self {
        Self {
            width,
            height,
            orientation,
            profile: CalibrationProfile::full_range(width, height),
        }
    }

    /// Display size as (width, height)
    pub fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Current orientation flags
    pub fn orientation(&self) -> OrientationFlags {
        self.orientation
    }

    /// Replace the orientation flags
    pub fn set_orientation(&mut self, flags: OrientationFlags) {
        self.orientation = flags;
    }

    /// Toggle orientation flags
    pub fn adjust_orientation(&mut self, flags: OrientationFlags) {
        self.orientation ^= flags;
    }

    /// Current calibration
    pub fn profile(&self) -> CalibrationProfile {
        self.profile
    }

    /// Install a stored calibration
    pub fn set_calibration(&mut self, profile: CalibrationProfile) {
        self.profile = profile;
    }

    /// Back to the full-range calibration
    pub fn reset_calibration(&mut self) {
        self.profile = CalibrationProfile::full_range(self.width, self.height);
    }

    /// Derive a calibration so `low` maps to `margin` and `high` to
    /// `dimension - 1 - margin` on each axis
    ///
    /// Leaves the current calibration untouched on error.
    pub fn calibrate(
        &mut self,
        bounds: &RawBounds,
    ) -> Result<CalibrationProfile, CalibrationError> {
        let (scale_x, offset_x) =
            calibrate_axis(bounds.x_low, bounds.x_high, bounds.margin, self.width)?;
        let (scale_y, offset_y) =
            calibrate_axis(bounds.y_low, bounds.y_high, bounds.margin, self.height)?;

        self.profile = CalibrationProfile {
            scale_x,
            scale_y,
            offset_x,
            offset_y,
        };
        Ok(self.profile)
    }

    /// Orient and calibrate a raw pair
    pub fn map(&self, raw_x: u16, raw_y: u16) -> MappedTouch {
        let (x, y) = apply_orientation(raw_x, raw_y, self.orientation);
        MappedTouch {
            x: apply_calibration(x, self.profile.scale_x, self.profile.offset_x, self.width),
            y: apply_calibration(y, self.profile.scale_y, self.profile.offset_y, self.height),
            raw: RawPoint { x, y },
        }
    }
}
