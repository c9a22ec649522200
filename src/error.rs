//! Unified error types for the TLC59116 firmware.
//!
//! A single `Error` enum that every driver operation returns, keeping the
//! caller's error handling uniform.  All variants are `Copy` so they can be
//! logged and matched on without allocation.
//!
//! Channel faults reported by the chip itself (overtemperature, open
//! circuit) are *not* errors here: they are polled data, surfaced through
//! [`ErrorFlags`](crate::drivers::tlc59116::ErrorFlags).

use core::fmt;

use embedded_hal::digital;
use embedded_hal::i2c;

// ---------------------------------------------------------------------------
// Top-level driver error
// ---------------------------------------------------------------------------

/// Every fallible driver operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An I2C transaction with the chip did not complete.
    Transport(TransportError),
    /// The hardware reset line could not be driven.
    ResetLine(digital::ErrorKind),
    /// A channel or group operation was issued before `init()`.
    NotInitialized,
    /// Channel index outside 0–15.
    InvalidChannel(u8),
    /// Raw write to a register the driver keeps a shadow of.
    ShadowedRegister(u8),
    /// Raw write to a register the chip only lets the host read.
    ReadOnlyRegister(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::ResetLine(kind) => write!(f, "reset line: {kind:?}"),
            Self::NotInitialized => write!(f, "driver used before init()"),
            Self::InvalidChannel(index) => write!(f, "invalid channel {index} (expected 0-15)"),
            Self::ShadowedRegister(reg) => {
                write!(f, "register 0x{reg:02X} is shadowed; use the mode API")
            }
            Self::ReadOnlyRegister(reg) => write!(f, "register 0x{reg:02X} is read-only"),
        }
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Single-register write failed.
    Write { register: u8, kind: i2c::ErrorKind },
    /// Write-then-read of a single register failed.
    Read { register: u8, kind: i2c::ErrorKind },
    /// Software-reset broadcast failed.
    Broadcast { kind: i2c::ErrorKind },
}

impl TransportError {
    pub const fn kind(self) -> i2c::ErrorKind {
        match self {
            Self::Write { kind, .. } | Self::Read { kind, .. } | Self::Broadcast { kind } => kind,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write { register, kind } => {
                write!(f, "write to 0x{register:02X} failed ({kind:?})")
            }
            Self::Read { register, kind } => {
                write!(f, "read of 0x{register:02X} failed ({kind:?})")
            }
            Self::Broadcast { kind } => write!(f, "software reset broadcast failed ({kind:?})"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Driver-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
