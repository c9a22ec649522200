//! TLC59116 demo firmware main entry point.
//!
//! ```text
//!   hw_init (I2C0 + RESET) ──▶ Tlc59116 ──▶ demo loop
//!                                  ▲            │
//!                                  └─ recover ◀─┘  (transport error)
//! ```
//!
//! Channel `demo.channel` toggles forever; an RGB LED on three further
//! channels holds a fixed colour and channel 4 blinks under group
//! control.  Error flags are polled every `demo.error_check_every` cycles.
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};

use tlc59116::color::DARK_ORANGE;
use tlc59116::config::SystemConfig;
use tlc59116::demo::{self, RgbLed};
use tlc59116::drivers::hw_init::{self, BoardDriver};
use tlc59116::drivers::tlc59116::{blink_code_from_period, duty_from_percent};
use tlc59116::{Tlc59116, pins};

/// Channel blinking under group control.
const GROUP_BLINK_CHANNEL: u8 = 4;

/// Put the non-toggling outputs into their demo state.  Re-run after
/// every reset, which returns the chip to all-off.
fn setup(tlc: &mut BoardDriver, led: &RgbLed) -> tlc59116::Result<()> {
    led.enable(tlc)?;
    led.set_hsl(tlc, DARK_ORANGE)?;
    tlc.enable_group(GROUP_BLINK_CHANNEL)?;
    tlc.set_group_blink(blink_code_from_period(2.0), duty_from_percent(50))
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("TLC59116 demo v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config ─────────────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;

    // ── 3. Bus + driver ───────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let (i2c, reset) = hw_init::init_bus(peripherals.i2c0, &config.driver)?;
    let mut tlc: BoardDriver = Tlc59116::new(i2c, reset, FreeRtos, &config.driver)?;
    tlc.init()?;

    let led = RgbLed::new(
        pins::RGB_RED_CHANNEL,
        pins::RGB_GREEN_CHANNEL,
        pins::RGB_BLUE_CHANNEL,
    )?;
    setup(&mut tlc, &led)?;

    // ── 4. Demo loop ──────────────────────────────────────────
    let mut delay = FreeRtos;
    let check_every = config.demo.error_check_every.max(1);
    let mut cycle: u32 = 0;

    loop {
        cycle = cycle.wrapping_add(1);
        let step = demo::toggle_channel(
            &mut tlc,
            &mut delay,
            config.demo.channel,
            config.demo.toggle_interval_ms,
            1,
        )
        .and_then(|()| {
            if cycle % check_every == 0 {
                if let Some(flags) = demo::poll_faults(&mut tlc)? {
                    warn!("main: {} channel(s) faulted", flags.faulted_channels().len());
                }
            }
            Ok(())
        });

        if let Err(e) = step {
            demo::recover(&mut tlc, e)?;
            setup(&mut tlc, &led)?;
        }
    }
}
