//! System configuration parameters
//!
//! All tunable parameters for the TLC59116 board: how to reach the chip,
//! and what the demo firmware does with it.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::drivers::tlc59116::Channel;
use crate::drivers::tlc59116::registers::{
    ADDRESS_MAX, ADDRESS_MIN, ALLCALL_DEFAULT_ADDRESS, SWRST_ADDRESS,
};

/// Fast-mode Plus ceiling supported by the TLC59116.
pub const MAX_BUS_FREQUENCY_HZ: u32 = 1_000_000;

/// How the driver reaches the chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// 7-bit device address set by the A3..A0 straps.
    pub address: u8,
    /// I2C clock rate in Hz
    pub bus_frequency_hz: u32,
    /// How long RESET is held low during a hardware reset (milliseconds)
    pub reset_pulse_ms: u32,
    /// Enable the MCU's internal pull-ups on SDA/SCL
    pub bus_pullups: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            address: 0x60,
            bus_frequency_hz: 400_000, // Fast-mode
            reset_pulse_ms: 1,
            bus_pullups: true,
        }
    }
}

/// What the demo firmware drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Channel toggled by the blink demo
    pub channel: u8,
    /// Time the channel spends in each state (milliseconds)
    pub toggle_interval_ms: u32,
    /// Poll the error flags once every N toggle cycles
    pub error_check_every: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            channel: 0,
            toggle_interval_ms: 1000,
            error_check_every: 10,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub driver: DriverConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Outside 0x60–0x6F, or one of the reserved all-call / reset addresses.
    InvalidAddress(u8),
    InvalidBusFrequency(u32),
    ZeroResetPulse,
    InvalidChannel(u8),
    ZeroInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress(a) => write!(f, "invalid device address 0x{a:02X}"),
            Self::InvalidBusFrequency(hz) => write!(f, "invalid bus frequency {hz} Hz"),
            Self::ZeroResetPulse => write!(f, "reset pulse must be at least 1 ms"),
            Self::InvalidChannel(c) => write!(f, "invalid demo channel {c}"),
            Self::ZeroInterval => write!(f, "toggle interval must be non-zero"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl SystemConfig {
    /// Reject values that would address the wrong device or wedge the bus.
    /// Invalid values are reported, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.driver;
        if !(ADDRESS_MIN..=ADDRESS_MAX).contains(&d.address)
            || d.address == ALLCALL_DEFAULT_ADDRESS
            || d.address == SWRST_ADDRESS
        {
            return Err(ConfigError::InvalidAddress(d.address));
        }
        if d.bus_frequency_hz == 0 || d.bus_frequency_hz > MAX_BUS_FREQUENCY_HZ {
            return Err(ConfigError::InvalidBusFrequency(d.bus_frequency_hz));
        }
        if d.reset_pulse_ms == 0 {
            return Err(ConfigError::ZeroResetPulse);
        }
        if Channel::new(self.demo.channel).is_err() {
            return Err(ConfigError::InvalidChannel(self.demo.channel));
        }
        if self.demo.toggle_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}
