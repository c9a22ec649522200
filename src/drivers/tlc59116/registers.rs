//! TLC59116 register map (datasheet SCDS249, section 9.6).
//!
//! Every register the driver touches is named here; driver logic never
//! uses bare register literals.

// ---------------------------------------------------------------------------
// Register addresses
// ---------------------------------------------------------------------------

/// Mode register 1 (oscillator, sub-address and all-call enables).
pub const MODE1: u8 = 0x00;
/// Mode register 2 (EFCLR, DMBLNK, OCH).
pub const MODE2: u8 = 0x01;
/// Individual brightness for channel 0; channel `n` is `PWM0 + n`.
pub const PWM0: u8 = 0x02;
/// Last individual brightness register (channel 15).
pub const PWM15: u8 = 0x11;
/// Group duty cycle (dimming) or blink duty (blinking).
pub const GRPPWM: u8 = 0x12;
/// Group blink period, ignored while dimming.
pub const GRPFREQ: u8 = 0x13;
/// Output state register for channels 0–3; channel `n` lives in `LEDOUT0 + n / 4`.
pub const LEDOUT0: u8 = 0x14;
pub const LEDOUT1: u8 = 0x15;
pub const LEDOUT2: u8 = 0x16;
pub const LEDOUT3: u8 = 0x17;
pub const SUBADR1: u8 = 0x18;
pub const SUBADR2: u8 = 0x19;
pub const SUBADR3: u8 = 0x1A;
pub const ALLCALLADR: u8 = 0x1B;
/// Output current gain.
pub const IREF: u8 = 0x1C;
/// Error flags for channels 0–7 (read only, active low).
pub const ERRFLAG1: u8 = 0x1D;
/// Error flags for channels 8–15 (read only, active low).
pub const ERRFLAG2: u8 = 0x1E;

/// Number of addressable registers.
pub const REGISTER_COUNT: usize = 0x1F;

/// Number of LEDOUT registers backing the 16 channels.
pub const LEDOUT_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Register bits
// ---------------------------------------------------------------------------

/// MODE1 value that wakes the chip: OSC = 0 (oscillator running).
pub const MODE1_ENABLE: u8 = 0x80;
/// MODE2 bit 7: writing 1 clears the latched error flags.
pub const MODE2_EFCLR: u8 = 0x80;
/// MODE2 bit 5: 0 = group dimming, 1 = group blinking.
pub const MODE2_DMBLNK: u8 = 0x20;

// ---------------------------------------------------------------------------
// LEDOUT 2-bit output state codes
// ---------------------------------------------------------------------------

/// Driver off (power-up default).
pub const LDR_OFF: u8 = 0b00;
/// Driver fully on.
pub const LDR_ON: u8 = 0b01;
/// Brightness from the channel's PWMx register.
pub const LDR_PWM: u8 = 0b10;
/// Brightness from PWMx and GRPPWM/GRPFREQ.
pub const LDR_GROUP: u8 = 0b11;

/// Width mask of one channel's output state field.
pub const LDR_MASK: u8 = 0b11;

// ---------------------------------------------------------------------------
// Bus-level constants
// ---------------------------------------------------------------------------

/// Reserved software-reset address shared by every TLC59116 on the bus.
pub const SWRST_ADDRESS: u8 = 0x6B;
/// Two-byte key that triggers a software reset when sent to `SWRST_ADDRESS`.
pub const SWRST_KEY: [u8; 2] = [0xA5, 0x5A];
/// Power-up default all-call address (7-bit).
pub const ALLCALL_DEFAULT_ADDRESS: u8 = 0x68;

/// Range of hardware-strappable device addresses (A3..A0 pins).
pub const ADDRESS_MIN: u8 = 0x60;
pub const ADDRESS_MAX: u8 = 0x6F;

/// Error flag value meaning "no faults" (one bit per channel, active low).
pub const ERRFLAG_ALL_CLEAR: u16 = 0xFFFF;

/// Registers a raw write must not touch because the driver shadows them.
pub const fn is_shadowed(register: u8) -> bool {
    register == MODE2 || (register >= LEDOUT0 && register <= LEDOUT3)
}

/// Registers the chip only allows to be read.
pub const fn is_read_only(register: u8) -> bool {
    register == ERRFLAG1 || register == ERRFLAG2
}
