//! Raw axis orientation

use core::ops::{BitOr, BitOrAssign, BitXor, BitXorAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ADC_MAX;

/// Orientation bit set
///
/// Applied in a fixed order: swap the axes, then mirror whichever axis the
/// reverse flags name (in the swapped frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrientationFlags(u8);

impl OrientationFlags {
    /// Raw axes used as-is
    pub const DEFAULT: Self = Self(0);
    /// Exchange the X and Y axes
    pub const SWAP_XY: Self = Self(0x01);
    /// Mirror X
    pub const REVERSE_X: Self = Self(0x02);
    /// Mirror Y
    pub const REVERSE_Y: Self = Self(0x04);

    const MASK: u8 = 0x07;

    /// Raw bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits, dropping unknown ones
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Check if every flag in `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Toggle the flags in `other`
    pub const fn toggled(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    /// Flags that undo this orientation
    ///
    /// Without a swap every orientation undoes itself. With a swap the
    /// mirror has to move to the other axis.
    pub const fn inverse(self) -> Self {
        if self.0 & Self::SWAP_XY.0 == 0 {
            return self;
        }
        let rx = self.0 & Self::REVERSE_X.0;
        let ry = self.0 & Self::REVERSE_Y.0;
        Self(Self::SWAP_XY.0 | (rx << 1) | (ry >> 1))
    }
}

impl BitOr for OrientationFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for OrientationFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for OrientationFlags {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.toggled(rhs)
    }
}

impl BitXorAssign for OrientationFlags {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

/// Apply an orientation to a raw 12-bit pair
pub fn apply_orientation(raw_x: u16, raw_y: u16, flags: OrientationFlags) -> (u16, u16) {
    let (mut x, mut y) = if flags.contains(OrientationFlags::SWAP_XY) {
        (raw_y, raw_x)
    } else {
        (raw_x, raw_y)
    };

    if flags.contains(OrientationFlags::REVERSE_X) {
        x = ADC_MAX.saturating_sub(x);
    }
    if flags.contains(OrientationFlags::REVERSE_Y) {
        y = ADC_MAX.saturating_sub(y);
    }

    (x, y)
}
