//! GPIO / peripheral pin assignments for the LED driver board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// I2C bus to the TLC59116
// ---------------------------------------------------------------------------

/// I2C data line.
pub const I2C_SDA_GPIO: i32 = 0;
/// I2C clock line.
pub const I2C_SCL_GPIO: i32 = 1;

// ---------------------------------------------------------------------------
// TLC59116 control
// ---------------------------------------------------------------------------

/// Digital output to the chip's RESET pin (active LOW).
pub const TLC_RESET_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// RGB LED wired to three TLC59116 outputs
// ---------------------------------------------------------------------------

pub const RGB_RED_CHANNEL: u8 = 1;
pub const RGB_GREEN_CHANNEL: u8 = 2;
pub const RGB_BLUE_CHANNEL: u8 = 3;
