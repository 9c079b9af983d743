//! Board-agnostic core logic for the panelbus drivers
//!
//! This crate contains everything that does not touch a pin:
//!
//! - Frame regions and flush-window clipping
//! - SSD1963 command set and power-up sequence builder
//! - Touch orientation, calibration and coordinate mapping
//! - Denoising ring for raw digitizer samples
//! - GUI time base
//! - Configuration types
//! - Traits the GUI framework consumes (flush target, touch input)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod tick;
pub mod touch;
pub mod traits;
