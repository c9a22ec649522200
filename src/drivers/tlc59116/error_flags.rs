//! Latched channel fault flags (ERRFLAG1/ERRFLAG2, datasheet 9.3.2).
//!
//! One bit per channel, **active low**: a cleared bit means the chip saw
//! an open circuit or overtemperature on that output.  `0xFFFF` is the
//! all-clear sentinel.

use core::fmt;

use super::registers::ERRFLAG_ALL_CLEAR;
use super::state::Channel;

/// Channels flagged in one [`ErrorFlags`] snapshot.
pub type FaultList = heapless::Vec<Channel, 16>;

/// Combined 16-bit error mask; ERRFLAG2 in the high byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorFlags(u16);

impl ErrorFlags {
    pub const ALL_CLEAR: Self = Self(ERRFLAG_ALL_CLEAR);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Combine the two raw register bytes.
    pub const fn from_registers(flag1: u8, flag2: u8) -> Self {
        Self(((flag2 as u16) << 8) | flag1 as u16)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// True if any channel is flagged.
    pub const fn has_faults(self) -> bool {
        self.0 != ERRFLAG_ALL_CLEAR
    }

    pub const fn is_faulted(self, channel: Channel) -> bool {
        self.0 & (1 << channel.index()) == 0
    }

    /// Every flagged channel, ascending.
    pub fn faulted_channels(self) -> FaultList {
        Channel::all().filter(|&ch| self.is_faulted(ch)).collect()
    }
}

impl Default for ErrorFlags {
    fn default() -> Self {
        Self::ALL_CLEAR
    }
}

impl fmt::Display for ErrorFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}
