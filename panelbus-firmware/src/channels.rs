//! Inter-task communication
//!
//! Statics shared between the tick task, the display task and main.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use panelbus_core::tick::TickCounter;
use panelbus_core::touch::TouchEvent;

/// GUI millisecond clock, advanced by the tick task
pub static TICKS: Mutex<CriticalSectionRawMutex, RefCell<TickCounter>> =
    Mutex::new(RefCell::new(TickCounter::new()));

/// Most recent touch state change
pub static LATEST_TOUCH: Signal<CriticalSectionRawMutex, TouchEvent> = Signal::new();

/// Current GUI time in milliseconds
pub fn now_ms() -> u32 {
    TICKS.lock(|ticks| ticks.borrow().now_ms())
}

/// Milliseconds since `earlier` on the GUI clock
pub fn elapsed_since(earlier: u32) -> u32 {
    TICKS.lock(|ticks| ticks.borrow().elapsed_since(earlier))
}
