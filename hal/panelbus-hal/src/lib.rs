//! panelbus Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the display and touch
//! drivers consume. Chip-specific HALs implement them so the drivers can be
//! exercised on the host against mock pins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  panelbus-drivers (SSD1963, XPT2046)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  panelbus-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ panelbus-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::ConfigurableDrive`] - Output drive strength
//! - [`port::ParallelPort`] - Eight data lines written together
//! - [`delay::BusyWait`] - Cycle-counted spin, wrapped by
//!   [`delay::CalibratedDelay`] into an `embedded_hal` delay

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod port;

// Re-export key traits at crate root for convenience
pub use delay::{BusyWait, CalibratedDelay, SpinCalibration};
pub use gpio::{ConfigurableDrive, DriveStrength, InputPin, OutputPin};
pub use port::ParallelPort;
