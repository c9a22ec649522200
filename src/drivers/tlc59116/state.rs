//! Output state model: channels, their 2-bit output modes, and the
//! in-memory shadow of the four LEDOUT registers.
//!
//! ## Packing
//!
//! ```text
//!   LEDOUTi   bit: 7 6 | 5 4 | 3 2 | 1 0
//!          channel: 4i+3| 4i+2| 4i+1| 4i
//! ```
//!
//! The chip only accepts whole-byte writes, so changing one channel means
//! rewriting the byte it shares with three siblings.  [`OutputStateBank`]
//! computes that byte from the last value written so siblings keep their
//! codes (datasheet 9.5.6).  Nothing in this module performs I/O.

use core::fmt;

use super::registers::{LDR_GROUP, LDR_MASK, LDR_OFF, LDR_ON, LDR_PWM, LEDOUT0, LEDOUT_COUNT, PWM0};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// A validated output channel index (0–15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Number of output channels on the chip.
    pub const COUNT: u8 = 16;

    /// Validate a raw index.  Out-of-range indices are rejected, never wrapped.
    pub const fn new(index: u8) -> Result<Self> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(Error::InvalidChannel(index))
        }
    }

    /// Every channel in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Which LEDOUT byte holds this channel (0–3).
    pub const fn bank_index(self) -> usize {
        (self.0 / 4) as usize
    }

    /// Bit offset of this channel's 2-bit field inside its LEDOUT byte.
    pub const fn bit_position(self) -> u8 {
        (self.0 % 4) * 2
    }

    /// Chip register holding this channel's output state.
    pub const fn ledout_register(self) -> u8 {
        LEDOUT0 + self.bank_index() as u8
    }

    /// Chip register holding this channel's individual duty cycle.
    pub const fn pwm_register(self) -> u8 {
        PWM0 + self.0
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        Self::new(index)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// OutputMode
// ---------------------------------------------------------------------------

/// How a single channel is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Driver off.
    #[default]
    Off,
    /// Fully on, ignoring every PWM register.
    On,
    /// Brightness from the channel's own PWM register.
    Pwm,
    /// Brightness from the channel's PWM register, gated by the group
    /// dimming/blinking registers.
    Group,
}

impl OutputMode {
    /// 2-bit LEDOUT code.
    pub const fn code(self) -> u8 {
        match self {
            Self::Off => LDR_OFF,
            Self::On => LDR_ON,
            Self::Pwm => LDR_PWM,
            Self::Group => LDR_GROUP,
        }
    }

    /// Decode a 2-bit field.  Bits above the field are ignored; all four
    /// codes are valid so decoding is total.
    pub const fn from_code(code: u8) -> Self {
        match code & LDR_MASK {
            LDR_OFF => Self::Off,
            LDR_ON => Self::On,
            LDR_PWM => Self::Pwm,
            _ => Self::Group,
        }
    }
}

// ---------------------------------------------------------------------------
// OutputStateBank
// ---------------------------------------------------------------------------

/// Shadow of LEDOUT0..LEDOUT3.
///
/// The driver computes a new byte with [`with_mode`](Self::with_mode),
/// writes it to the chip, and only then [`commit`](Self::commit)s it, so
/// the bank always equals what the chip last accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputStateBank([u8; LEDOUT_COUNT]);

impl OutputStateBank {
    /// All channels off.
    pub const fn new() -> Self {
        Self([0; LEDOUT_COUNT])
    }

    pub const fn from_bytes(bytes: [u8; LEDOUT_COUNT]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; LEDOUT_COUNT] {
        self.0
    }

    pub const fn mode(&self, channel: Channel) -> OutputMode {
        OutputMode::from_code(self.0[channel.bank_index()] >> channel.bit_position())
    }

    /// The LEDOUT byte that results from setting `channel` to `mode`,
    /// leaving the other three channels of that byte untouched.
    pub const fn with_mode(&self, channel: Channel, mode: OutputMode) -> u8 {
        let pos = channel.bit_position();
        let cleared = self.0[channel.bank_index()] & !(LDR_MASK << pos);
        match mode {
            OutputMode::Off => cleared,
            _ => cleared | (mode.code() << pos),
        }
    }

    /// Store a byte the chip has accepted for `channel`'s LEDOUT register.
    pub fn commit(&mut self, channel: Channel, byte: u8) {
        self.0[channel.bank_index()] = byte;
    }

    /// Compute and store in one step.  Returns the new byte.
    pub fn set_mode(&mut self, channel: Channel, mode: OutputMode) -> u8 {
        let byte = self.with_mode(channel, mode);
        self.commit(channel, byte);
        byte
    }

    /// Back to the power-up state (all channels off).
    pub fn clear(&mut self) {
        self.0 = [0; LEDOUT_COUNT];
    }

    pub fn is_all_off(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}
