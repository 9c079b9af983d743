//! Resistive touch drivers

pub mod panel;
pub mod xpt2046;

pub use panel::{SamplerState, TouchPanel};
pub use xpt2046::{Channel, LinkTiming, TouchAdc, Xpt2046Link};
