//! Display and touch driver implementations
//!
//! Concrete drivers built on the `panelbus-hal` pin traits:
//!
//! - Latched 8-bit parallel bus with strobe timing
//! - SSD1963 LCD controller (power-up, flush, fill)
//! - XPT2046-class resistive touch controller over a bit-banged link

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod lcd;
pub mod touch;

#[cfg(test)]
mod mock;
