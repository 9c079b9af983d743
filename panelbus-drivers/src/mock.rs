//! Recording mocks shared by the driver tests

use core::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use panelbus_hal::{ConfigurableDrive, DriveStrength, InputPin, OutputPin, ParallelPort};

use crate::bus::LcdBus;
use crate::touch::xpt2046::TouchAdc;

pub const LOG_LEN: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Wr,
    Latch,
    Cs,
    Dc,
    Reset,
    Read,
    Backlight,
    Clk,
    Din,
    TouchCs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Pin(Line, bool),
    Drive(Line, DriveStrength),
    Port(u8),
    DelayNs(u32),
    DelayUs(u32),
    DelayMs(u32),
    // bus level
    Prepare,
    Select(bool),
    DataMode(bool),
    Byte(u8),
    Word(u16),
    Strobes(u32),
    // touch link level
    Idle,
    Command(u8),
    Read { next: u8 },
}

pub type Log = RefCell<Vec<Event, LOG_LEN>>;

fn record(log: &Log, event: Event) {
    // Full logs fail the tests that inspect them
    let _ = log.borrow_mut().push(event);
}

pub struct MockPin<'a> {
    line: Line,
    high: bool,
    log: &'a Log,
}

impl<'a> MockPin<'a> {
    pub fn new(line: Line, log: &'a Log) -> Self {
        Self {
            line,
            high: false,
            log,
        }
    }
}

impl OutputPin for MockPin<'_> {
    fn set_high(&mut self) {
        self.high = true;
        record(self.log, Event::Pin(self.line, true));
    }

    fn set_low(&mut self) {
        self.high = false;
        record(self.log, Event::Pin(self.line, false));
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

impl ConfigurableDrive for MockPin<'_> {
    fn set_drive_strength(&mut self, strength: DriveStrength) {
        record(self.log, Event::Drive(self.line, strength));
    }
}

/// Input that replays a script of levels, then holds the last one
pub struct MockInput<'a> {
    levels: &'a [bool],
    next: Cell<usize>,
}

impl<'a> MockInput<'a> {
    pub fn new(levels: &'a [bool]) -> Self {
        Self {
            levels,
            next: Cell::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.next.get()
    }
}

impl InputPin for MockInput<'_> {
    fn is_high(&self) -> bool {
        let i = self.next.get();
        self.next.set(i + 1);
        self.levels
            .get(i)
            .or(self.levels.last())
            .copied()
            .unwrap_or(false)
    }
}

pub struct MockPort<'a> {
    log: &'a Log,
}

impl<'a> MockPort<'a> {
    pub fn new(log: &'a Log) -> Self {
        Self { log }
    }
}

impl ParallelPort for MockPort<'_> {
    fn write(&mut self, value: u8) {
        record(self.log, Event::Port(value));
    }
}

pub struct MockDelay<'a> {
    log: &'a Log,
}

impl<'a> MockDelay<'a> {
    pub fn new(log: &'a Log) -> Self {
        Self { log }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        record(self.log, Event::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        record(self.log, Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        record(self.log, Event::DelayMs(ms));
    }
}

/// Bus that records operations, folding runs of strobes into one event
pub struct MockBus<'a> {
    log: &'a Log,
}

impl<'a> MockBus<'a> {
    pub fn new(log: &'a Log) -> Self {
        Self { log }
    }
}

impl LcdBus for MockBus<'_> {
    fn prepare(&mut self) {
        record(self.log, Event::Prepare);
    }

    fn select(&mut self, selected: bool) {
        record(self.log, Event::Select(selected));
    }

    fn set_data_mode(&mut self, data: bool) {
        record(self.log, Event::DataMode(data));
    }

    fn write_latched_byte(&mut self, value: u8) {
        record(self.log, Event::Byte(value));
    }

    fn write_word(&mut self, value: u16) {
        record(self.log, Event::Word(value));
    }

    fn pulse_strobe(&mut self) {
        let mut log = self.log.borrow_mut();
        if let Some(Event::Strobes(n)) = log.last_mut() {
            *n += 1;
            return;
        }
        let _ = log.push(Event::Strobes(1));
    }

    fn delay_ms(&mut self, ms: u32) {
        record(self.log, Event::DelayMs(ms));
    }
}

/// Touch ADC that answers conversions from a script, then repeats a tail value
pub struct MockAdc<'a> {
    log: &'a Log,
    samples: &'a [u16],
    tail: u16,
    drawn: usize,
}

impl<'a> MockAdc<'a> {
    pub fn new(log: &'a Log, samples: &'a [u16], tail: u16) -> Self {
        Self {
            log,
            samples,
            tail,
            drawn: 0,
        }
    }
}

impl TouchAdc for MockAdc<'_> {
    fn idle(&mut self) {
        record(self.log, Event::Idle);
    }

    fn write_command(&mut self, command: u8) {
        record(self.log, Event::Command(command));
    }

    fn read_data(&mut self, next: u8) -> u16 {
        record(self.log, Event::Read { next });
        let value = self.samples.get(self.drawn).copied().unwrap_or(self.tail);
        self.drawn += 1;
        value
    }
}

/// Events matching a filter, in order
pub fn filtered(log: &Log, keep: impl Fn(&Event) -> bool) -> Vec<Event, LOG_LEN> {
    log.borrow().iter().filter(|&e| keep(e)).copied().collect()
}
