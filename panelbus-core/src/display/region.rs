//! Frame regions and flush windows
//!
//! The GUI hands over dirty rectangles in panel pixel space that may hang off
//! any edge. Nothing reaches the bus until a region has been clipped.

use core::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rectangle in panel pixel space, corners inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameRegion {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl FrameRegion {
    /// Create a region from inclusive corners
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a region from its top-left corner and size
    ///
    /// A zero width or height gives an empty region.
    pub const fn from_origin(x: i32, y: i32, width: u16, height: u16) -> Self {
        let (x1, x2) = span(x, width);
        let (y1, y2) = span(y, height);
        Self { x1, y1, x2, y2 }
    }

    /// The whole panel
    pub const fn full(width: u16, height: u16) -> Self {
        Self::from_origin(0, 0, width, height)
    }

    /// True if the corners are inverted on either axis
    pub const fn is_empty(&self) -> bool {
        self.x1 > self.x2 || self.y1 > self.y2
    }

    /// Width in pixels (0 when empty)
    pub const fn width(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (self.x2 as i64 - self.x1 as i64 + 1) as u32
        }
    }

    /// Height in pixels (0 when empty)
    pub const fn height(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (self.y2 as i64 - self.y1 as i64 + 1) as u32
        }
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Check if a pixel lies inside the region
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Clip into `[0, width-1] x [0, height-1]`
    ///
    /// Returns `None` when nothing of the region lies on the panel.
    pub fn clip(&self, width: u16, height: u16) -> Option<FrameRegion> {
        if width == 0 || height == 0 {
            return None;
        }

        let clipped = FrameRegion {
            x1: self.x1.max(0),
            y1: self.y1.max(0),
            x2: self.x2.min(width as i32 - 1),
            y2: self.y2.min(height as i32 - 1),
        };

        if clipped.is_empty() {
            None
        } else {
            Some(clipped)
        }
    }

    /// Clip and work out where the visible pixels sit in the source buffer
    ///
    /// The source buffer always covers the unclipped region, row-major.
    pub fn flush_window(&self, width: u16, height: u16) -> Option<FlushWindow> {
        let area = self.clip(width, height)?;

        Some(FlushWindow {
            area,
            stride: to_index(self.width()),
            skip_cols: to_index((area.x1 as i64 - self.x1 as i64) as u32),
            skip_rows: to_index((area.y1 as i64 - self.y1 as i64) as u32),
        })
    }
}

/// Inclusive corners of `len` pixels from `start`
///
/// A zero length gives inverted corners. At `i32::MIN` the start moves up
/// one so the end can sit below it.
const fn span(start: i32, len: u16) -> (i32, i32) {
    if len == 0 {
        let start = if start == i32::MIN { start + 1 } else { start };
        (start, start - 1)
    } else {
        (start, start.saturating_add(len as i32 - 1))
    }
}

fn to_index(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Clipped region plus its position inside the caller's pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlushWindow {
    /// On-panel area to address
    pub area: FrameRegion,
    /// Source row length (`full_w`)
    pub stride: usize,
    /// Source columns left of the panel edge
    pub skip_cols: usize,
    /// Source rows above the panel edge
    pub skip_rows: usize,
}

impl FlushWindow {
    /// Visible columns per row (`act_w`)
    pub fn columns(&self) -> usize {
        to_index(self.area.width())
    }

    /// Visible rows
    pub fn rows(&self) -> usize {
        to_index(self.area.height())
    }

    /// Source buffer indices for one visible row
    pub fn row_span(&self, row: usize) -> Range<usize> {
        let start = self
            .skip_rows
            .saturating_add(row)
            .saturating_mul(self.stride)
            .saturating_add(self.skip_cols);
        start..start.saturating_add(self.columns())
    }
}
