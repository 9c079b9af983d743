//! GPIO wrappers
//!
//! Newtypes over the embassy pin drivers so the panelbus traits can be
//! implemented for them.

use embassy_rp::gpio::{Drive, Input, Level, Output, Pin, Pull};
use embassy_rp::Peri;
use panelbus_hal::{ConfigurableDrive, DriveStrength, InputPin, OutputPin};

/// Push-pull output
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    /// Configure a pin as an output at `high`
    pub fn new(pin: Peri<'d, impl Pin>, high: bool) -> Self {
        let level = if high { Level::High } else { Level::Low };
        Self(Output::new(pin, level))
    }

    /// Get the embassy driver back
    pub fn into_inner(self) -> Output<'d> {
        self.0
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

impl ConfigurableDrive for RpOutput<'_> {
    fn set_drive_strength(&mut self, strength: DriveStrength) {
        self.0.set_drive_strength(drive(strength));
    }
}

fn drive(strength: DriveStrength) -> Drive {
    match strength {
        DriveStrength::Ma2 => Drive::_2mA,
        DriveStrength::Ma4 => Drive::_4mA,
        DriveStrength::Ma8 => Drive::_8mA,
        DriveStrength::Ma12 => Drive::_12mA,
    }
}

/// Digital input
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    /// Configure a pin as a floating input
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self(Input::new(pin, Pull::None))
    }

    /// Configure a pin as an input with the internal pull-up
    ///
    /// Used for open-drain lines such as the touch pen-down IRQ.
    pub fn new_pull_up(pin: Peri<'d, impl Pin>) -> Self {
        Self(Input::new(pin, Pull::Up))
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
