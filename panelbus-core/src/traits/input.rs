//! Pointer input trait

use crate::touch::TouchEvent;

/// Pointer device polled by the GUI
pub trait TouchInput {
    /// Sample the device once
    ///
    /// Always returns an event. `repeat` is set when the previous poll also
    /// saw a press.
    fn poll(&mut self) -> TouchEvent;
}
