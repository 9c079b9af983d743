//! Resistive touch panel sampler
//!
//! Combines the conversion link, chip select, the pen-down IRQ line and a
//! [`CoordinateMapper`] into something the GUI can poll once per tick.
//!
//! Per poll:
//! 1. IRQ high (no contact): released, nothing else happens
//! 2. Assert CS, let the panel settle
//! 3. Denoise X, then Y (see [`panelbus_core::touch::denoise`])
//! 4. Re-check IRQ: a finger lifted mid-read reports released
//! 5. Release CS, orient and calibrate
//!
//! Conversions are taken in 12-bit differential mode with the reference
//! kept on between them, following TI app note SBAA036.

use embedded_hal::delay::DelayNs;
use panelbus_core::config::{ConfigError, TouchConfig, UnconvergedPolicy};
use panelbus_core::touch::{
    denoise, CalibrationError, CalibrationProfile, Convergence, CoordinateMapper, DenoiseParams,
    FilteredSample, MappedTouch, OrientationFlags, RawBounds, RawPoint, TouchEvent,
    DEFAULT_RING_LEN,
};
use panelbus_core::traits::TouchInput;
use panelbus_hal::{InputPin, OutputPin};

use super::xpt2046::{Channel, TouchAdc};

/// Where the sampler is in its cycle
///
/// `Accepted` and `BestEffort` describe the last completed poll and hold
/// until the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SamplerState {
    /// No contact on the last poll
    #[default]
    Idle,
    /// Conversions in progress
    Sampling,
    /// Both axes settled
    Accepted,
    /// At least one axis ran out of attempts
    BestEffort,
}

/// Touch panel driver
///
/// `N` is the denoise ring length.
pub struct TouchPanel<ADC, CS, IRQ, D, const N: usize = DEFAULT_RING_LEN> {
    adc: ADC,
    cs: CS,
    irq: IRQ,
    delay: D,
    config: TouchConfig,
    mapper: CoordinateMapper,
    pressed: bool,
    state: SamplerState,
}

impl<ADC, CS, IRQ, D, const N: usize> TouchPanel<ADC, CS, IRQ, D, N>
where
    ADC: TouchAdc,
    CS: OutputPin,
    IRQ: InputPin,
    D: DelayNs,
{
    /// Create a driver
    pub fn new(
        adc: ADC,
        cs: CS,
        irq: IRQ,
        delay: D,
        config: TouchConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if N == 0 {
            return Err(ConfigError::RingTooSmall);
        }

        Ok(Self {
            adc,
            cs,
            irq,
            delay,
            mapper: CoordinateMapper::new(config.width, config.height, config.orientation),
            config,
            pressed: false,
            state: SamplerState::Idle,
        })
    }

    /// Put the lines at rest and wake the controller
    ///
    /// Restores the full-range calibration and the configured orientation.
    pub fn init(&mut self) {
        self.mapper = CoordinateMapper::new(
            self.config.width,
            self.config.height,
            self.config.orientation,
        );
        self.pressed = false;
        self.state = SamplerState::Idle;

        self.adc.idle();
        self.cs.set_high();
        self.delay.delay_ms(self.config.wake_ms);

        // first conversion after power-up is junk
        self.cs.set_low();
        let _ = self.denoise(Channel::X);
        self.cs.set_high();
    }

    fn params(&self) -> DenoiseParams {
        DenoiseParams {
            tolerance: self.config.tolerance,
            max_attempts: self.config.max_attempts,
        }
    }

    /// Settle one axis
    ///
    /// CS must already be asserted. The conversion right after the command
    /// is discarded while the input settles, and the chain ends by powering
    /// the ADC down.
    pub fn denoise(&mut self, channel: Channel) -> Convergence {
        let command = channel.command();
        let params = self.params();

        self.adc.write_command(command);
        let _ = self.adc.read_data(command);

        let adc = &mut self.adc;
        let result = denoise::<N>(params, || adc.read_data(command));

        self.adc.read_data(channel.power_down());
        self.adc.read_data(0);

        result
    }

    fn read_axes(&mut self) -> Option<(FilteredSample, FilteredSample, bool)> {
        let reject = self.config.unconverged == UnconvergedPolicy::Reject;

        let x = self.denoise(Channel::X);
        if reject && !x.is_converged() {
            return None;
        }
        let y = self.denoise(Channel::Y);
        if reject && !y.is_converged() {
            return None;
        }

        Some((x.value(), y.value(), x.is_converged() && y.is_converged()))
    }

    fn sample(&mut self) -> Option<MappedTouch> {
        if self.irq.is_high() {
            self.state = SamplerState::Idle;
            return None;
        }

        self.state = SamplerState::Sampling;
        self.cs.set_low();
        self.delay.delay_us(self.config.settle_us);

        let reading = self.read_axes();
        let still_touched = self.irq.is_low();
        self.cs.set_high();

        let Some((x, y, converged)) = reading else {
            self.state = SamplerState::BestEffort;
            return None;
        };
        if !still_touched {
            self.state = SamplerState::Idle;
            return None;
        }

        self.state = if converged {
            SamplerState::Accepted
        } else {
            SamplerState::BestEffort
        };
        Some(self.mapper.map(x, y))
    }

    /// Poll and also return the oriented raw values of a press
    pub fn poll_with_raw(&mut self) -> (TouchEvent, Option<RawPoint>) {
        let was_pressed = self.pressed;
        let touch = self.sample();
        self.pressed = touch.is_some();

        match touch {
            Some(t) => (TouchEvent::pressed_at(t.x, t.y, was_pressed), Some(t.raw)),
            None => (TouchEvent::released(), None),
        }
    }

    /// Poll once
    pub fn poll(&mut self) -> TouchEvent {
        self.poll_with_raw().0
    }

    /// Get the sampler state
    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// Check if the last poll saw a press
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Get the configuration
    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Get the coordinate mapper
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Derive a calibration from raw values seen at targets `margin` pixels
    /// from each edge
    pub fn calibrate(
        &mut self,
        bounds: &RawBounds,
    ) -> Result<CalibrationProfile, CalibrationError> {
        self.mapper.calibrate(bounds)
    }

    /// Install a stored calibration
    pub fn set_calibration(&mut self, profile: CalibrationProfile) {
        self.mapper.set_calibration(profile);
    }

    pub fn orientation(&self) -> OrientationFlags {
        self.mapper.orientation()
    }

    /// Toggle orientation flags
    pub fn adjust_orientation(&mut self, flags: OrientationFlags) {
        self.mapper.adjust_orientation(flags);
    }

    /// Change how unsettled axes are reported
    pub fn set_unconverged_policy(&mut self, policy: UnconvergedPolicy) {
        self.config.unconverged = policy;
    }
}

impl<ADC, CS, IRQ, D, const N: usize> TouchInput for TouchPanel<ADC, CS, IRQ, D, N>
where
    ADC: TouchAdc,
    CS: OutputPin,
    IRQ: InputPin,
    D: DelayNs,
{
    fn poll(&mut self) -> TouchEvent {
        TouchPanel::poll(self)
    }
}
