//! Group control: dimming vs blinking, and the unit conversions for the
//! GRPPWM / GRPFREQ registers.
//!
//! The driver core only ever takes raw register codes (0–255).  Callers
//! that think in seconds or percent convert at the boundary with the
//! helpers below.
//!
//! ## Blink period law (datasheet 9.6.5)
//!
//! ```text
//!   period_s = (GRPFREQ + 1) / 24        GRPFREQ = period_s * 24 - 1
//!   0x00 -> 41.7 ms (24 Hz)              0xFF -> 10.67 s
//! ```

use super::registers::MODE2_DMBLNK;

/// Blink steps per second of period.
pub const BLINK_STEPS_PER_SECOND: f32 = 24.0;

/// Shortest representable blink period (code 0x00).
pub const BLINK_PERIOD_MIN_SECS: f32 = 1.0 / BLINK_STEPS_PER_SECOND;

/// Longest representable blink period (code 0xFF).
pub const BLINK_PERIOD_MAX_SECS: f32 = 256.0 / BLINK_STEPS_PER_SECOND;

/// How the chip interprets GRPPWM/GRPFREQ for channels in group mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupMode {
    /// GRPPWM scales brightness; GRPFREQ is ignored.  Power-up default.
    #[default]
    Dimming,
    /// GRPFREQ sets the blink period, GRPPWM the on-fraction of it.
    Blinking,
}

impl GroupMode {
    /// The DMBLNK bit pattern for MODE2.
    pub const fn mode2_bits(self) -> u8 {
        match self {
            Self::Dimming => 0,
            Self::Blinking => MODE2_DMBLNK,
        }
    }
}

/// GRPFREQ code for a blink period, rounded to the nearest step and
/// clamped to the chip's range.
pub fn blink_code_from_period(period_secs: f32) -> u8 {
    let steps = (period_secs * BLINK_STEPS_PER_SECOND).round() - 1.0;
    steps.clamp(0.0, 255.0) as u8
}

/// Blink period in seconds for a GRPFREQ code.
pub fn blink_period_from_code(code: u8) -> f32 {
    (f32::from(code) + 1.0) / BLINK_STEPS_PER_SECOND
}

/// Blink frequency in Hz for a GRPFREQ code.
pub fn blink_frequency_hz(code: u8) -> f32 {
    BLINK_STEPS_PER_SECOND / (f32::from(code) + 1.0)
}

/// Scale a 0–100 percentage to a 0–255 duty code.  Values above 100 saturate.
pub fn duty_from_percent(percent: u8) -> u8 {
    let percent = percent.min(100);
    ((percent as u16) * 255 / 100) as u8
}
