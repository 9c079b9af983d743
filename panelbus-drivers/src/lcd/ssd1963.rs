//! SSD1963 LCD controller
//!
//! Drives an SSD1963 with its own frame buffer over a [`LcdBus`]. The
//! controller keeps the panel refreshed by itself, so the host only ever
//! writes rectangles of RGB565 pixels into display RAM.
//!
//! # Pixel streaming
//!
//! After `WRITE_MEMORY_START` every WR pulse stores the word on the bus and
//! advances the write pointer through the addressed window. Runs of equal
//! pixels therefore cost one latched write followed by bare strobes, which
//! is what makes full-screen fills and flat GUI backgrounds cheap.

use panelbus_core::config::{ConfigError, PanelConfig};
use panelbus_core::display::ssd1963::{cmd, window_args};
use panelbus_core::display::{init_sequence, FrameRegion, InitSequence, InitStep, Rgb565};
use panelbus_core::traits::{FlushStats, FlushTarget};
use panelbus_hal::OutputPin;

use crate::bus::LcdBus;

/// SSD1963 driver
pub struct Ssd1963<BUS, RST, RD, BL> {
    bus: BUS,
    reset: RST,
    read: RD,
    backlight: BL,
    config: PanelConfig,
    sequence: InitSequence,
}

impl<BUS, RST, RD, BL> Ssd1963<BUS, RST, RD, BL>
where
    BUS: LcdBus,
    RST: OutputPin,
    RD: OutputPin,
    BL: OutputPin,
{
    /// Create a driver
    ///
    /// The power-up sequence is built here, so a bad configuration is
    /// rejected before any pin moves.
    pub fn new(
        bus: BUS,
        reset: RST,
        read: RD,
        backlight: BL,
        config: PanelConfig,
    ) -> Result<Self, ConfigError> {
        let sequence = init_sequence(&config)?;
        Ok(Self {
            bus,
            reset,
            read,
            backlight,
            config,
            sequence,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Reset and configure the controller, then light the backlight
    ///
    /// Blocks for well over a second: the reset pulse, PLL lock, soft reset
    /// and the final backlight wait are all spent spinning.
    pub fn init(&mut self) {
        self.reset.set_high();
        self.read.set_high();
        self.backlight.set_low();
        self.bus.prepare();

        let reset_ms = self.config.timing.reset_ms;
        self.bus.delay_ms(reset_ms);
        self.reset.set_low();
        self.bus.delay_ms(reset_ms);
        self.reset.set_high();
        self.bus.delay_ms(reset_ms);

        self.bus.select(true);
        let sequence = core::mem::take(&mut self.sequence);
        for step in &sequence {
            self.run_step(step);
        }
        self.sequence = sequence;
        self.bus.select(false);

        self.bus.delay_ms(self.config.timing.backlight_on_ms);
        self.backlight.set_high();
    }

    fn run_step(&mut self, step: &InitStep) {
        match step {
            InitStep::Command { cmd, args } => self.send(*cmd, args),
            InitStep::DelayMs(ms) => self.bus.delay_ms(*ms),
            InitStep::Fill { colour } => {
                let full = FrameRegion::full(self.config.width, self.config.height);
                self.stream_fill(&full, *colour);
            }
        }
    }

    fn send(&mut self, command: u8, args: &[u8]) {
        self.bus.write_command(command);
        if !args.is_empty() {
            self.bus.write_args(args);
        }
    }

    /// Send one command with chip select wrapped around it
    pub fn command(&mut self, command: u8, args: &[u8]) {
        self.bus.select(true);
        self.send(command, args);
        self.bus.select(false);
    }

    /// Address a clipped window and open display RAM for pixel data
    fn open_window(&mut self, area: &FrameRegion) {
        let (columns, pages) = window_args(area);
        self.send(cmd::SET_COLUMN_ADDRESS, &columns);
        self.send(cmd::SET_PAGE_ADDRESS, &pages);
        self.send(cmd::WRITE_MEMORY_START, &[]);
        self.bus.set_data_mode(true);
    }

    /// Write rendered pixels into a region
    ///
    /// `pixels` covers the unclipped region row by row. Rows the buffer does
    /// not fully cover are not written. `done` runs exactly once.
    pub fn flush<F: FnOnce()>(
        &mut self,
        region: FrameRegion,
        pixels: &[Rgb565],
        done: F,
    ) -> FlushStats {
        let mut stats = FlushStats::default();

        if let Some(window) = region.flush_window(self.config.width, self.config.height) {
            self.bus.select(true);
            self.open_window(&window.area);
            for row in 0..window.rows() {
                let Some(line) = pixels.get(window.row_span(row)) else {
                    break;
                };
                self.write_row(line, &mut stats);
            }
            self.bus.select(false);
        }

        done();
        stats
    }

    fn write_row(&mut self, line: &[Rgb565], stats: &mut FlushStats) {
        let Some((&first, rest)) = line.split_first() else {
            return;
        };

        self.bus.write_word(first);
        stats.latched += 1;

        let mut last = first;
        for &pixel in rest {
            if pixel == last {
                self.bus.pulse_strobe();
                stats.repeated += 1;
            } else {
                self.bus.write_word(pixel);
                stats.latched += 1;
                last = pixel;
            }
        }
        stats.rows += 1;
    }

    /// Fill a region with one colour
    pub fn fill<F: FnOnce()>(
        &mut self,
        region: FrameRegion,
        colour: Rgb565,
        done: F,
    ) -> FlushStats {
        let mut stats = FlushStats::default();

        if let Some(area) = region.clip(self.config.width, self.config.height) {
            self.bus.select(true);
            stats = self.stream_fill(&area, colour);
            self.bus.select(false);
        }

        done();
        stats
    }

    /// One latched pixel, then a strobe per remaining pixel
    fn stream_fill(&mut self, area: &FrameRegion, colour: Rgb565) -> FlushStats {
        self.open_window(area);
        self.bus.write_word(colour);

        let pixels = area.area() as u32;
        for _ in 1..pixels {
            self.bus.pulse_strobe();
        }

        FlushStats {
            rows: area.height(),
            latched: 1,
            repeated: pixels.saturating_sub(1),
        }
    }

    /// Switch the backlight enable line
    pub fn set_backlight(&mut self, on: bool) {
        self.backlight.set_state(on);
    }

    /// Check if the backlight is on
    pub fn backlight_on(&self) -> bool {
        self.backlight.is_set_high()
    }

    /// Release the bus and pins
    pub fn release(self) -> (BUS, RST, RD, BL) {
        (self.bus, self.reset, self.read, self.backlight)
    }
}

impl<BUS, RST, RD, BL> FlushTarget for Ssd1963<BUS, RST, RD, BL>
where
    BUS: LcdBus,
    RST: OutputPin,
    RD: OutputPin,
    BL: OutputPin,
{
    fn dimensions(&self) -> (u16, u16) {
        (self.config.width, self.config.height)
    }

    fn flush<F: FnOnce()>(
        &mut self,
        region: FrameRegion,
        pixels: &[Rgb565],
        done: F,
    ) -> FlushStats {
        Ssd1963::flush(self, region, pixels, done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{filtered, Event, Line, Log, MockBus, MockPin};
    use proptest::prelude::*;

    type TestLcd<'a> = Ssd1963<MockBus<'a>, MockPin<'a>, MockPin<'a>, MockPin<'a>>;

    fn lcd(log: &Log, config: PanelConfig) -> TestLcd<'_> {
        Ssd1963::new(
            MockBus::new(log),
            MockPin::new(Line::Reset, log),
            MockPin::new(Line::Read, log),
            MockPin::new(Line::Backlight, log),
            config,
        )
        .unwrap()
    }

    fn window_events(x1: u16, x2: u16, y1: u16, y2: u16) -> [Event; 17] {
        let [x1h, x1l] = x1.to_be_bytes();
        let [x2h, x2l] = x2.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        let [y2h, y2l] = y2.to_be_bytes();
        [
            Event::DataMode(false),
            Event::Byte(0x2A),
            Event::DataMode(true),
            Event::Byte(x1h),
            Event::Byte(x1l),
            Event::Byte(x2h),
            Event::Byte(x2l),
            Event::DataMode(false),
            Event::Byte(0x2B),
            Event::DataMode(true),
            Event::Byte(y1h),
            Event::Byte(y1l),
            Event::Byte(y2h),
            Event::Byte(y2l),
            Event::DataMode(false),
            Event::Byte(0x2C),
            Event::DataMode(true),
        ]
    }

    #[test]
    fn test_invalid_config_rejected() {
        let log = Log::default();
        let result = Ssd1963::new(
            MockBus::new(&log),
            MockPin::new(Line::Reset, &log),
            MockPin::new(Line::Read, &log),
            MockPin::new(Line::Backlight, &log),
            PanelConfig {
                width: 0,
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(ConfigError::ZeroDimension)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_repeat_pixels_strobe_only() {
        let log = Log::default();
        let mut lcd = lcd(&log, PanelConfig::default());
        let (c, x) = (0x1234, 0xBEEF);

        let stats = lcd.flush(FrameRegion::new(10, 20, 14, 20), &[c, c, c, x, c], || {});

        assert_eq!(
            stats,
            FlushStats {
                rows: 1,
                latched: 3,
                repeated: 2
            }
        );

        let mut expected: heapless::Vec<Event, 32> = heapless::Vec::new();
        expected.push(Event::Select(true)).unwrap();
        expected
            .extend_from_slice(&window_events(10, 14, 20, 20))
            .unwrap();
        expected
            .extend_from_slice(&[
                Event::Word(c),
                Event::Strobes(2),
                Event::Word(x),
                Event::Word(c),
                Event::Select(false),
            ])
            .unwrap();
        assert_eq!(log.borrow().as_slice(), expected.as_slice());
    }

    #[test]
    fn test_run_restarts_each_row() {
        let log = Log::default();
        let mut lcd = lcd(&log, PanelConfig::default());
        let c = 0x0F0F;

        let stats = lcd.flush(FrameRegion::new(0, 0, 2, 1), &[c; 6], || {});

        // every row re-latches its first pixel
        assert_eq!(stats.rows, 2);
        assert_eq!(stats.latched, 2);
        assert_eq!(stats.repeated, 4);
    }

    #[test]
    fn test_off_panel_region_calls_done_without_bus() {
        let log = Log::default();
        let mut lcd = lcd(&log, PanelConfig::default());
        let mut calls = 0;

        let stats = lcd.flush(FrameRegion::new(800, 0, 820, 10), &[0; 21 * 11], || calls += 1);

        assert_eq!(calls, 1);
        assert_eq!(stats, FlushStats::default());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_done_called_once_on_write() {
        let log = Log::default();
        let mut lcd = lcd(&log, PanelConfig::default());
        let mut calls = 0;

        lcd.flush(FrameRegion::new(0, 0, 1, 1), &[1, 2, 3, 4], || calls += 1);

        assert_eq!(calls, 1);
    }

    #[test]
    fn test_clipped_flush_skips_hidden_source_pixels() {
        let log = Log::default();
        let mut lcd = lcd(&log, PanelConfig::default());

        // 3x2 source with its first column off the left edge
        let pixels = [1, 2, 3, 4, 5, 6];
        let stats = lcd.flush(FrameRegion::new(-1, 0, 1, 1), &pixels, || {});

        assert_eq!(stats.rows, 2);
        let words = filtered(&log, |e| matches!(e, Event::Word(_)));
        assert_eq!(
            words.as_slice(),
            &[Event::Word(2), Event::Word(3), Event::Word(5), Event::Word(6)]
        );
        let bytes = filtered(&log, |e| matches!(e, Event::Byte(_)));
        // column window starts at 0
        assert_eq!(bytes[1..5], [Event::Byte(0), Event::Byte(0), Event::Byte(0), Event::Byte(1)]);
    }

    #[test]
    fn test_short_buffer_stops_at_uncovered_row() {
        let log = Log::default();
        let mut lcd = lcd(&log, PanelConfig::default());
        let mut calls = 0;

        // 4x3 region but only five pixels
        let stats = lcd.flush(FrameRegion::new(0, 0, 3, 2), &[7; 5], || calls += 1);

        assert_eq!(stats.rows, 1);
        assert_eq!(stats.pixels(), 4);
        assert_eq!(calls, 1);
        assert_eq!(log.borrow().last(), Some(&Event::Select(false)));
    }

    #[test]
    fn test_fill_single_latch() {
        let log = Log::default();
        let mut lcd = lcd(&log, PanelConfig::default());

        let stats = lcd.fill(FrameRegion::new(-5, -5, 9, 4), 0xF800, || {});

        assert_eq!(stats.latched, 1);
        assert_eq!(stats.repeated, 10 * 5 - 1);
        assert_eq!(stats.rows, 5);
        let events = log.borrow();
        let tail = &events[events.len() - 3..];
        assert_eq!(
            tail,
            &[Event::Word(0xF800), Event::Strobes(49), Event::Select(false)]
        );
    }

    #[test]
    fn test_init_order() {
        let log = Log::default();
        let mut lcd = lcd(&log, PanelConfig::default());

        lcd.init();

        let events = log.borrow();

        // idle levels and reset pulse come first
        assert_eq!(
            &events[..9],
            &[
                Event::Pin(Line::Reset, true),
                Event::Pin(Line::Read, true),
                Event::Pin(Line::Backlight, false),
                Event::Prepare,
                Event::DelayMs(15),
                Event::Pin(Line::Reset, false),
                Event::DelayMs(15),
                Event::Pin(Line::Reset, true),
                Event::DelayMs(15),
            ]
        );
        assert_eq!(events[9], Event::Select(true));
        assert_eq!(&events[10..12], &[Event::DataMode(false), Event::Byte(0xE2)]);

        // backlight only after chip select is released and the wait is over
        let n = events.len();
        assert_eq!(
            &events[n - 3..],
            &[
                Event::Select(false),
                Event::DelayMs(1000),
                Event::Pin(Line::Backlight, true),
            ]
        );

        // full-panel clear: one pixel latched, the rest strobed
        assert!(events.contains(&Event::Strobes(800 * 480 - 1)));
    }

    #[test]
    fn test_init_command_order() {
        let log = Log::default();
        let mut lcd = lcd(&log, PanelConfig::default());

        lcd.init();

        let commands: heapless::Vec<u8, 32> = {
            let events = log.borrow();
            events
                .windows(2)
                .filter_map(|w| match w {
                    [Event::DataMode(false), Event::Byte(b)] => Some(*b),
                    _ => None,
                })
                .collect()
        };
        assert_eq!(
            commands.as_slice(),
            &[
                0xE2, 0xE0, 0xE0, 0x01, 0xE6, 0xB0, 0xB4, 0xB6, 0xBA, 0xB8, 0xF0, 0x2A, 0x2B,
                0x2C, 0x29, 0xBE, 0xD0
            ]
        );
    }

    #[test]
    fn test_backlight_toggle() {
        let log = Log::default();
        let mut lcd = lcd(&log, PanelConfig::default());

        lcd.set_backlight(true);
        assert!(lcd.backlight_on());
        lcd.set_backlight(false);
        assert!(!lcd.backlight_on());
    }

    #[test]
    fn test_flush_target_dimensions() {
        let log = Log::default();
        let lcd = lcd(&log, PanelConfig::default());
        assert_eq!(FlushTarget::dimensions(&lcd), (800, 480));
    }

    proptest! {
        #[test]
        fn flush_latches_only_value_changes(row in prop::collection::vec(0u16..3, 1..64)) {
            let log = Log::default();
            let mut lcd = lcd(&log, PanelConfig::default());
            let region = FrameRegion::from_origin(0, 0, row.len() as u16, 1);

            let stats = lcd.flush(region, &row, || {});

            let changes = row.windows(2).filter(|pair| pair[0] != pair[1]).count() as u32;
            prop_assert_eq!(stats.latched, 1 + changes);
            prop_assert_eq!(stats.pixels(), row.len() as u32);

            let words = log
                .borrow()
                .iter()
                .filter(|e| matches!(e, Event::Word(_)))
                .count() as u32;
            prop_assert_eq!(words, stats.latched);
        }
    }
}
