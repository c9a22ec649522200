//! Demonstration routines built on the public driver API.
//!
//! Each routine runs a bounded number of steps so it can be driven from
//! tests; the firmware binary calls them in its endless loop.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::color::{Hsl, Rgb};
use crate::drivers::tlc59116::{Channel, ErrorFlags, Tlc59116};
use crate::error::{Error, Result};

/// Blink one channel: on, wait, off, wait, `cycles` times.
pub fn toggle_channel<I2C, RST, D, W>(
    drv: &mut Tlc59116<I2C, RST, D>,
    delay: &mut W,
    channel: u8,
    interval_ms: u32,
    cycles: u32,
) -> Result<()>
where
    I2C: I2c,
    RST: OutputPin,
    D: DelayNs,
    W: DelayNs,
{
    for _ in 0..cycles {
        drv.turn_on(channel)?;
        delay.delay_ms(interval_ms);
        drv.turn_off(channel)?;
        delay.delay_ms(interval_ms);
    }
    Ok(())
}

/// Poll the error flags; on any fault, log them (which also clears them)
/// and return the snapshot.
pub fn poll_faults<I2C, RST, D>(drv: &mut Tlc59116<I2C, RST, D>) -> Result<Option<ErrorFlags>>
where
    I2C: I2c,
    RST: OutputPin,
    D: DelayNs,
{
    if drv.check_errors()? {
        return drv.report_errors().map(Some);
    }
    Ok(None)
}

/// Hardware-reset the chip after a transport error.  Other errors are
/// returned unchanged: they indicate caller bugs, not lost sync.
pub fn recover<I2C, RST, D>(drv: &mut Tlc59116<I2C, RST, D>, err: Error) -> Result<()>
where
    I2C: I2c,
    RST: OutputPin,
    D: DelayNs,
{
    match err {
        Error::Transport(e) => {
            warn!("demo: {e}; resetting chip");
            drv.reset_driver()
        }
        other => Err(other),
    }
}

/// An RGB LED on three channels, each under individual PWM control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbLed {
    red: Channel,
    green: Channel,
    blue: Channel,
}

impl RgbLed {
    pub fn new(red: u8, green: u8, blue: u8) -> Result<Self> {
        Ok(Self {
            red: Channel::new(red)?,
            green: Channel::new(green)?,
            blue: Channel::new(blue)?,
        })
    }

    /// Switch all three channels to PWM mode.
    pub fn enable<I2C, RST, D>(&self, drv: &mut Tlc59116<I2C, RST, D>) -> Result<()>
    where
        I2C: I2c,
        RST: OutputPin,
        D: DelayNs,
    {
        for ch in [self.red, self.green, self.blue] {
            drv.enable_pwm(ch.index())?;
        }
        Ok(())
    }

    pub fn set_rgb<I2C, RST, D>(&self, drv: &mut Tlc59116<I2C, RST, D>, colour: Rgb) -> Result<()>
    where
        I2C: I2c,
        RST: OutputPin,
        D: DelayNs,
    {
        drv.set_channel_duty(self.red.index(), colour.r)?;
        drv.set_channel_duty(self.green.index(), colour.g)?;
        drv.set_channel_duty(self.blue.index(), colour.b)
    }

    pub fn set_hsl<I2C, RST, D>(&self, drv: &mut Tlc59116<I2C, RST, D>, colour: Hsl) -> Result<()>
    where
        I2C: I2c,
        RST: OutputPin,
        D: DelayNs,
    {
        self.set_rgb(drv, colour.to_rgb())
    }

    pub fn off<I2C, RST, D>(&self, drv: &mut Tlc59116<I2C, RST, D>) -> Result<()>
    where
        I2C: I2c,
        RST: OutputPin,
        D: DelayNs,
    {
        self.set_rgb(drv, Rgb::OFF)
    }
}

/// Walk the hue wheel from `start` in `step_deg` increments.
pub fn hue_sweep<I2C, RST, D, W>(
    drv: &mut Tlc59116<I2C, RST, D>,
    delay: &mut W,
    led: &RgbLed,
    start: Hsl,
    step_deg: f32,
    step_ms: u32,
    steps: u32,
) -> Result<()>
where
    I2C: I2c,
    RST: OutputPin,
    D: DelayNs,
    W: DelayNs,
{
    info!("demo: hue sweep, {steps} steps of {step_deg} deg");
    for i in 0..steps {
        let colour = start.with_hue(start.hue + step_deg * i as f32);
        led.set_hsl(drv, colour)?;
        delay.delay_ms(step_ms);
    }
    Ok(())
}
