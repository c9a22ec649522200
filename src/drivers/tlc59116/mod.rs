//! TLC59116 16-channel constant-current LED sink driver.
//!
//! - [`registers`]: the chip's register map and bit constants.
//! - [`state`]: channels, output modes and the LEDOUT shadow.
//! - [`group`]: group dimming/blinking and unit conversions.
//! - [`error_flags`]: active-low channel fault mask.
//! - [`driver`]: [`Tlc59116`], which ties them to an I2C bus.

pub mod driver;
pub mod error_flags;
pub mod group;
pub mod registers;
pub mod state;

pub use driver::Tlc59116;
pub use error_flags::{ErrorFlags, FaultList};
pub use group::{
    GroupMode, blink_code_from_period, blink_frequency_hz, blink_period_from_code,
    duty_from_percent,
};
pub use state::{Channel, OutputMode, OutputStateBank};
