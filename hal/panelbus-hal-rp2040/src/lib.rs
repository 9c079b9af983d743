//! RP2040-specific HAL for the panelbus drivers
//!
//! Implements the `panelbus-hal` traits on top of `embassy-rp`:
//!
//! - Output and input pin wrappers with pad drive control
//! - Eight-line data port
//! - Cycle spin for nanosecond bus timing

#![no_std]

pub mod delay;
pub mod gpio;
pub mod port;

pub use delay::{platform_delay, CycleSpin, PlatformDelay};
pub use gpio::{RpInput, RpOutput};
pub use port::GpioPort;

// Re-export shared traits for convenience
pub use panelbus_hal::{DriveStrength, InputPin, OutputPin, ParallelPort};
