//! TLC59116 driver.
//!
//! Owns the I2C bus handle, the active-low RESET line and a delay source,
//! and keeps an in-memory shadow of everything the chip cannot be asked
//! for cheaply: the four LEDOUT bytes, the group dimming/blinking bit and
//! the last polled error flags.
//!
//! ## Shadow discipline
//!
//! A shadow value is committed only after the bus write carrying it has
//! succeeded, so the shadow always equals what the chip last accepted.  A
//! failed write clears [`is_in_sync`](Tlc59116::is_in_sync): the chip may
//! or may not have latched the byte, and only [`reset_driver`]
//! (Tlc59116::reset_driver) or [`reset_all_devices`]
//! (Tlc59116::reset_all_devices) re-establish a known state.
//!
//! ## Lifecycle
//!
//! ```text
//!   new() ──▶ init() ──▶ channel / group / diagnostics ops
//!                 ▲               │
//!                 └─ reset_driver / reset_all_devices
//! ```
//!
//! Single-threaded and blocking: every call returns once the bus
//! transaction completes.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, I2c};
use log::{debug, info, warn};

use super::error_flags::ErrorFlags;
use super::group::GroupMode;
use super::registers::{
    ERRFLAG1, ERRFLAG2, GRPFREQ, GRPPWM, MODE1, MODE1_ENABLE, MODE2, MODE2_EFCLR, SWRST_ADDRESS,
    SWRST_KEY, is_read_only, is_shadowed,
};
use super::state::{Channel, OutputMode, OutputStateBank};
use crate::config::DriverConfig;
use crate::error::{Error, Result, TransportError};

/// Duty written before switching a channel into PWM or group mode.
const FULL_DUTY: u8 = 0xFF;

pub struct Tlc59116<I2C, RST, D> {
    i2c: I2C,
    reset: RST,
    delay: D,
    address: u8,
    reset_pulse_ms: u32,
    ledout: OutputStateBank,
    group_mode: GroupMode,
    error_flags: ErrorFlags,
    initialized: bool,
    in_sync: bool,
}

impl<I2C, RST, D> Tlc59116<I2C, RST, D>
where
    I2C: I2c,
    RST: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the bus, reset line and delay.
    ///
    /// Releases RESET (drives it high) straight away; no bus traffic is
    /// generated until [`init`](Self::init).
    pub fn new(i2c: I2C, mut reset: RST, delay: D, config: &DriverConfig) -> Result<Self> {
        reset.set_high().map_err(reset_line_error)?;
        Ok(Self {
            i2c,
            reset,
            delay,
            address: config.address,
            reset_pulse_ms: config.reset_pulse_ms,
            ledout: OutputStateBank::new(),
            group_mode: GroupMode::Dimming,
            error_flags: ErrorFlags::ALL_CLEAR,
            initialized: false,
            in_sync: true,
        })
    }

    /// Bring the chip out of sleep.  Must precede every other operation.
    ///
    /// The bus itself is configured (clock rate, pin roles, pull-ups) by
    /// whoever built the `I2C` handle; see `drivers::hw_init` on ESP-IDF.
    pub fn init(&mut self) -> Result<()> {
        self.enable()?;
        if !self.initialized {
            // Nothing but MODE1 can have been written yet, so the shadow
            // still holds power-up values.
            self.in_sync = true;
        }
        self.initialized = true;
        info!("tlc59116: enabled at 0x{:02X}", self.address);
        Ok(())
    }

    /// Write MODE1 to start the oscillator.
    pub fn enable(&mut self) -> Result<()> {
        self.write(MODE1, MODE1_ENABLE)
    }

    /// Give back the owned peripherals.
    pub fn release(self) -> (I2C, RST, D) {
        (self.i2c, self.reset, self.delay)
    }

    // ── Per-channel output state ─────────────────────────────────

    /// Set one channel's output mode, preserving the three siblings that
    /// share its LEDOUT register.  Returns the byte written.
    pub fn set_channel_mode(&mut self, channel: u8, mode: OutputMode) -> Result<u8> {
        self.ensure_initialized()?;
        let channel = Channel::new(channel)?;
        self.modify_channel_mode(channel, mode)
    }

    pub fn turn_on(&mut self, channel: u8) -> Result<()> {
        self.set_channel_mode(channel, OutputMode::On).map(drop)
    }

    pub fn turn_off(&mut self, channel: u8) -> Result<()> {
        self.set_channel_mode(channel, OutputMode::Off).map(drop)
    }

    /// Put a channel under individual PWM control at full duty.
    ///
    /// The duty register is loaded first so the output never passes
    /// through a stale (possibly zero) brightness.
    pub fn enable_pwm(&mut self, channel: u8) -> Result<()> {
        self.ensure_initialized()?;
        let channel = Channel::new(channel)?;
        self.write(channel.pwm_register(), FULL_DUTY)?;
        self.modify_channel_mode(channel, OutputMode::Pwm).map(drop)
    }

    /// Put a channel under group dimming/blinking control at full
    /// individual duty.
    pub fn enable_group(&mut self, channel: u8) -> Result<()> {
        self.ensure_initialized()?;
        let channel = Channel::new(channel)?;
        self.write(channel.pwm_register(), FULL_DUTY)?;
        self.modify_channel_mode(channel, OutputMode::Group).map(drop)
    }

    /// Load a channel's individual duty register.  Only visible while the
    /// channel is in PWM or group mode.
    pub fn set_channel_duty(&mut self, channel: u8, duty: u8) -> Result<()> {
        self.ensure_initialized()?;
        let channel = Channel::new(channel)?;
        self.write(channel.pwm_register(), duty)
    }

    pub fn turn_off_all_channels(&mut self) -> Result<()> {
        for channel in Channel::all() {
            self.turn_off(channel.index())?;
        }
        Ok(())
    }

    // ── Group control ────────────────────────────────────────────

    /// Select group dimming (if blinking) and load GRPPWM.
    pub fn set_group_duty(&mut self, duty: u8) -> Result<()> {
        self.ensure_initialized()?;
        if self.group_mode == GroupMode::Blinking {
            self.set_group_mode(GroupMode::Dimming)?;
        }
        self.write(GRPPWM, duty)
    }

    /// Select group blinking with the given GRPFREQ code and GRPPWM duty.
    ///
    /// GRPPWM is shared between both group modes, so the duty is loaded
    /// through [`set_group_duty`](Self::set_group_duty) first, which parks
    /// the chip in dimming; the switch to blinking follows.
    pub fn set_group_blink(&mut self, frequency: u8, duty: u8) -> Result<()> {
        self.set_group_duty(duty)?;
        if self.group_mode == GroupMode::Dimming {
            self.set_group_mode(GroupMode::Blinking)?;
        }
        self.write(GRPFREQ, frequency)
    }

    // ── Diagnostics ──────────────────────────────────────────────

    /// Poll ERRFLAG1/ERRFLAG2 and cache the result.  Returns `true` if any
    /// channel reports a fault.
    pub fn check_errors(&mut self) -> Result<bool> {
        self.ensure_initialized()?;
        let flag1 = self.read(ERRFLAG1)?;
        let flag2 = self.read(ERRFLAG2)?;
        debug!("tlc59116: ERRFLAG1=0x{flag1:02X} ERRFLAG2=0x{flag2:02X}");
        self.error_flags = ErrorFlags::from_registers(flag1, flag2);
        Ok(self.error_flags.has_faults())
    }

    /// Log the flags cached by the last [`check_errors`](Self::check_errors),
    /// then clear the chip's latched flags to re-arm detection.  The clear
    /// runs whether or not anything was flagged.
    pub fn report_errors(&mut self) -> Result<ErrorFlags> {
        self.ensure_initialized()?;
        let flags = self.error_flags;
        if flags.has_faults() {
            warn!("tlc59116: error flags {flags}");
            for channel in flags.faulted_channels() {
                warn!("tlc59116: channel {channel} overtemperature or open circuit");
            }
        } else {
            info!("tlc59116: no errors detected");
        }
        self.clear_errors()?;
        Ok(flags)
    }

    /// Pulse MODE2.EFCLR.  The DMBLNK bit is written back with its current
    /// value on both writes so the group mode survives the clear.
    pub fn clear_errors(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        let mode2 = self.group_mode.mode2_bits();
        self.write(MODE2, MODE2_EFCLR | mode2)?;
        self.write(MODE2, mode2)
    }

    // ── Reset ────────────────────────────────────────────────────

    /// Hardware reset through the RESET line, then re-enable.
    ///
    /// Use whenever the shadow can no longer be trusted, e.g. after a
    /// transport error.  The driver counts as out of sync until the pulse
    /// completes; if the line cannot be driven the shadow is left as it was.
    pub fn reset_driver(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        self.in_sync = false;
        self.reset.set_low().map_err(reset_line_error)?;
        self.delay.delay_ms(self.reset_pulse_ms);
        self.reset.set_high().map_err(reset_line_error)?;
        self.forget_chip_state();
        self.enable()?;
        self.in_sync = true;
        info!("tlc59116: hardware reset complete");
        Ok(())
    }

    /// Broadcast the software-reset key to every TLC59116 on the bus, then
    /// re-enable this one.  Other chips on the bus are left asleep.
    pub fn reset_all_devices(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        if let Err(e) = self.i2c.write(SWRST_ADDRESS, &SWRST_KEY) {
            self.in_sync = false;
            return Err(TransportError::Broadcast { kind: i2c::Error::kind(&e) }.into());
        }
        self.forget_chip_state();
        self.enable()?;
        self.in_sync = true;
        info!("tlc59116: software reset broadcast complete");
        Ok(())
    }

    // ── Raw register access ──────────────────────────────────────

    /// Read any register.
    pub fn read_register(&mut self, register: u8) -> Result<u8> {
        self.ensure_initialized()?;
        self.read(register)
    }

    /// Write a register the driver does not shadow (IREF, sub-addresses,
    /// PWMx, ...).  LEDOUTx and MODE2 are refused, as are the read-only
    /// ERRFLAGx registers.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<()> {
        self.ensure_initialized()?;
        if is_shadowed(register) {
            return Err(Error::ShadowedRegister(register));
        }
        if is_read_only(register) {
            return Err(Error::ReadOnlyRegister(register));
        }
        self.write(register, value)
    }

    // ── State introspection ──────────────────────────────────────

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// False after a failed write or reset until the next successful reset.
    pub fn is_in_sync(&self) -> bool {
        self.in_sync
    }

    pub fn output_state(&self) -> &OutputStateBank {
        &self.ledout
    }

    pub fn channel_mode(&self, channel: u8) -> Result<OutputMode> {
        Ok(self.ledout.mode(Channel::new(channel)?))
    }

    pub fn group_mode(&self) -> GroupMode {
        self.group_mode
    }

    /// Flags from the last poll; advisory until the next `check_errors`.
    pub fn error_flags(&self) -> ErrorFlags {
        self.error_flags
    }

    // ── Internal ─────────────────────────────────────────────────

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized { Ok(()) } else { Err(Error::NotInitialized) }
    }

    fn modify_channel_mode(&mut self, channel: Channel, mode: OutputMode) -> Result<u8> {
        let byte = self.ledout.with_mode(channel, mode);
        self.write(channel.ledout_register(), byte)?;
        self.ledout.commit(channel, byte);
        debug!("tlc59116: channel {channel} -> {mode:?} (LEDOUT=0x{byte:02X})");
        Ok(byte)
    }

    fn set_group_mode(&mut self, mode: GroupMode) -> Result<()> {
        self.write(MODE2, mode.mode2_bits())?;
        self.group_mode = mode;
        Ok(())
    }

    /// Shadow values matching the chip's power-up defaults.
    fn forget_chip_state(&mut self) {
        self.ledout.clear();
        self.group_mode = GroupMode::Dimming;
        self.error_flags = ErrorFlags::ALL_CLEAR;
    }

    fn write(&mut self, register: u8, value: u8) -> Result<()> {
        if let Err(e) = self.i2c.write(self.address, &[register, value]) {
            let kind = i2c::Error::kind(&e);
            if self.in_sync {
                warn!("tlc59116: write to 0x{register:02X} failed ({kind:?}); shadow out of sync");
            }
            self.in_sync = false;
            return Err(TransportError::Write { register, kind }.into());
        }
        Ok(())
    }

    fn read(&mut self, register: u8) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .map_err(|e| TransportError::Read { register, kind: i2c::Error::kind(&e) })?;
        Ok(buf[0])
    }
}

fn reset_line_error<E: digital::Error>(e: E) -> Error {
    Error::ResetLine(e.kind())
}
