//! GUI tick task
//!
//! Advances the GUI clock every 5 ms and wakes the display task.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use panelbus_core::tick::TICK_PERIOD_MS;

use crate::channels::TICKS;

/// Signal raised on every tick, carries the GUI time
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started ({} ms period)", TICK_PERIOD_MS);

    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS as u64));

    loop {
        ticker.next().await;

        let now = TICKS.lock(|ticks| {
            let mut ticks = ticks.borrow_mut();
            ticks.tick(TICK_PERIOD_MS);
            ticks.now_ms()
        });

        TICK_SIGNAL.signal(now);
    }
}
