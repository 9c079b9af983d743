//! panelbus demo firmware
//!
//! Brings up an 800x480 SSD1963 panel on the latched 8-bit bus and the
//! resistive touch controller, then tracks the pen with a cursor sprite.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;
use {defmt_rtt as _, panic_probe as _};

mod board;
mod channels;
mod tasks;

use board::{LcdPins, TouchPins};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("panelbus firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!(
        "Peripherals initialized, clk_sys {} Hz",
        embassy_rp::clocks::clk_sys_freq()
    );

    let lcd_pins = LcdPins {
        data: [
            Peri::<AnyPin>::from(p.PIN_0),
            Peri::<AnyPin>::from(p.PIN_1),
            Peri::<AnyPin>::from(p.PIN_2),
            Peri::<AnyPin>::from(p.PIN_3),
            Peri::<AnyPin>::from(p.PIN_4),
            Peri::<AnyPin>::from(p.PIN_5),
            Peri::<AnyPin>::from(p.PIN_6),
            Peri::<AnyPin>::from(p.PIN_7),
        ],
        latch: p.PIN_8.into(),
        read: p.PIN_9.into(),
        write: p.PIN_10.into(),
        dc: p.PIN_11.into(),
        cs: p.PIN_12.into(),
        reset: p.PIN_13.into(),
        backlight: p.PIN_14.into(),
    };

    let touch_pins = TouchPins {
        dout: p.PIN_16.into(),
        cs: p.PIN_17.into(),
        clk: p.PIN_18.into(),
        din: p.PIN_19.into(),
        irq: p.PIN_20.into(),
    };

    let lcd = unwrap!(lcd_pins.into_driver(board::panel_config()));
    let touch = unwrap!(touch_pins.into_driver(board::touch_config()));
    info!("Drivers constructed");

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::display_task(lcd, touch)).unwrap();

    info!("All tasks spawned");

    // Log touch activity published by the display task
    loop {
        let event = channels::LATEST_TOUCH.wait().await;
        let now = channels::now_ms();
        if event.pressed {
            trace!("[{} ms] touch at ({}, {})", now, event.x, event.y);
        } else {
            trace!("[{} ms] touch released", now);
        }
    }
}
