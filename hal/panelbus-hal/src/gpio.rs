//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs. Pin writes are infallible: the bus wiring has no
//! readback path, so there is nothing a caller could do with an error.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Output drive strength
///
/// Mirrors the four pad settings found on the RP2040 and most Cortex-M parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveStrength {
    /// 2 mA
    Ma2,
    /// 4 mA (usual reset default)
    #[default]
    Ma4,
    /// 8 mA
    Ma8,
    /// 12 mA
    Ma12,
}

impl DriveStrength {
    /// Pad register field value (0 = 2 mA ... 3 = 12 mA)
    pub const fn field(self) -> u8 {
        match self {
            DriveStrength::Ma2 => 0,
            DriveStrength::Ma4 => 1,
            DriveStrength::Ma8 => 2,
            DriveStrength::Ma12 => 3,
        }
    }
}

/// Output pin whose pad drive strength can be changed
///
/// Strobe lines that toggle every few nanoseconds need stronger drive to
/// keep their edges sharp.
pub trait ConfigurableDrive {
    /// Set the pad drive strength
    fn set_drive_strength(&mut self, strength: DriveStrength);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latch(bool);

    impl OutputPin for Latch {
        fn set_high(&mut self) {
            self.0 = true;
        }

        fn set_low(&mut self) {
            self.0 = false;
        }

        fn is_set_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_set_state() {
        let mut pin = Latch(false);
        pin.set_state(true);
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(pin.is_set_low());
    }

    #[test]
    fn test_drive_field() {
        assert_eq!(DriveStrength::Ma2.field(), 0);
        assert_eq!(DriveStrength::Ma8.field(), 2);
        assert_eq!(DriveStrength::default(), DriveStrength::Ma4);
    }
}
