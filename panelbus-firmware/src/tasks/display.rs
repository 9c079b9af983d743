//! Display service task
//!
//! Owns both drivers. Touch is polled once per GUI tick and the cursor
//! sprite is flushed wherever the pen is. Flush and poll are synchronous, so
//! the bus and the touch link are never used at the same time.

use defmt::*;
use embassy_time::Timer;
use panelbus_core::display::{colour, rgb565, FrameRegion, Rgb565};
use panelbus_core::touch::TouchEvent;

use crate::board::{self, Lcd, Touch};
use crate::channels;
use crate::tasks::tick::TICK_SIGNAL;

const CURSOR_SIZE: u16 = 16;
const CURSOR_HALF: i32 = CURSOR_SIZE as i32 / 2;
const CURSOR_PIXELS: usize = CURSOR_SIZE as usize * CURSOR_SIZE as usize;

const BACKGROUND: Rgb565 = colour::BLACK;
const SPLASH_MS: u64 = 2000;

const BARS: [Rgb565; 8] = [
    colour::WHITE,
    colour::YELLOW,
    colour::CYAN,
    colour::GREEN,
    colour::MAGENTA,
    colour::RED,
    colour::BLUE,
    rgb565(64, 64, 64),
];

/// Crosshair on the background colour
static CURSOR: [Rgb565; CURSOR_PIXELS] = cursor_sprite();

const fn cursor_sprite() -> [Rgb565; CURSOR_PIXELS] {
    let mut pixels = [BACKGROUND; CURSOR_PIXELS];
    let size = CURSOR_SIZE as usize;
    let mid = size / 2;
    let mut i = 0;
    while i < size {
        pixels[mid * size + i] = colour::WHITE;
        pixels[i * size + mid] = colour::WHITE;
        i += 1;
    }
    pixels
}

fn cursor_region(x: u16, y: u16) -> FrameRegion {
    FrameRegion::from_origin(
        x as i32 - CURSOR_HALF,
        y as i32 - CURSOR_HALF,
        CURSOR_SIZE,
        CURSOR_SIZE,
    )
}

fn draw_colour_bars(lcd: &mut Lcd) {
    let width = lcd.config().width;
    let height = lcd.config().height;
    let bar_width = width / BARS.len() as u16;

    for (i, &bar) in BARS.iter().enumerate() {
        let x = i as i32 * bar_width as i32;
        let region = FrameRegion::from_origin(x, 0, bar_width, height);
        let stats = lcd.fill(region, bar, || {});
        trace!("Bar {} filled, {} pixels", i, stats.pixels());
    }
}

#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd, mut touch: Touch) {
    info!("Display task started");

    lcd.init();
    info!(
        "LCD initialised ({}x{}), backlight {}",
        lcd.config().width,
        lcd.config().height,
        lcd.backlight_on()
    );

    draw_colour_bars(&mut lcd);

    touch.init();
    match touch.calibrate(&board::TOUCH_BOUNDS) {
        Ok(profile) => info!("Touch calibrated: {}", profile),
        Err(e) => warn!("Touch calibration rejected, using full range: {}", e),
    }

    Timer::after_millis(SPLASH_MS).await;

    let panel = FrameRegion::full(lcd.config().width, lcd.config().height);
    lcd.fill(panel, BACKGROUND, || {});

    let mut last = TouchEvent::released();
    let mut cursor: Option<FrameRegion> = None;
    let mut pressed_at = 0u32;

    loop {
        let now = TICK_SIGNAL.wait().await;

        let (event, raw) = touch.poll_with_raw();

        if event.pressed && !event.repeat {
            pressed_at = now;
            debug!("Pen down at ({}, {}), raw {}", event.x, event.y, raw);
        } else if !event.pressed && last.pressed {
            debug!(
                "Pen up after {} ms ({})",
                channels::elapsed_since(pressed_at),
                touch.state()
            );
        }

        let moved = event.pressed && (event.x, event.y) != (last.x, last.y);
        if moved || event.pressed != last.pressed {
            if let Some(old) = cursor.take() {
                lcd.fill(old, BACKGROUND, || {});
            }
            if event.pressed {
                let region = cursor_region(event.x, event.y);
                let stats = lcd.flush(region, &CURSOR, || {});
                trace!(
                    "Cursor flushed: {} rows, {} latched, {} repeated",
                    stats.rows,
                    stats.latched,
                    stats.repeated
                );
                cursor = Some(region);
            }
            channels::LATEST_TOUCH.signal(event);
        }

        last = event;
    }
}
