//! Resistive digitizer configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::touch::OrientationFlags;

/// What to report when an axis never settles within the attempt limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnconvergedPolicy {
    /// Report the last ring mean as a press
    #[default]
    Accept,
    /// Report no press
    Reject,
}

/// Touch controller and mapping settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchConfig {
    /// Display width the touches map onto
    pub width: u16,
    /// Display height the touches map onto
    pub height: u16,
    /// Raw axis orientation
    pub orientation: OrientationFlags,
    /// Largest distance from the ring mean a settled sample may have
    pub tolerance: u16,
    /// Convergence checks per axis before giving up
    pub max_attempts: u8,
    /// Wait after selecting the chip before the first command
    pub settle_us: u32,
    /// Wait after wake-up before the discarded first conversion
    pub wake_ms: u32,
    /// Handling of an axis that never settles
    pub unconverged: UnconvergedPolicy,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            orientation: OrientationFlags::DEFAULT,
            tolerance: 40,
            max_attempts: 16,
            settle_us: 100,
            wake_ms: 10,
            unconverged: UnconvergedPolicy::Accept,
        }
    }
}

impl TouchConfig {
    /// Check the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        Ok(())
    }
}
