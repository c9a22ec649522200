//! One-shot bus and GPIO bring-up for the TLC59116.
//!
//! Configures I2C0 at the configured clock rate on the SDA/SCL pins from
//! [`pins`](crate::pins), and claims the RESET line as a push-pull output.
//! Called once from `main()` before the driver is constructed.

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Output, PinDriver};
use esp_idf_hal::i2c::{I2C0, I2cConfig, I2cDriver};
use esp_idf_hal::units::Hertz;
use esp_idf_svc::sys::EspError;
use log::info;

use crate::config::DriverConfig;
use crate::drivers::tlc59116::Tlc59116;
use crate::pins;

/// Driver type as wired on the board.
pub type BoardDriver = Tlc59116<I2cDriver<'static>, PinDriver<'static, AnyOutputPin, Output>, FreeRtos>;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug)]
pub enum HwInitError {
    I2cInitFailed(EspError),
    GpioConfigFailed(EspError),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2cInitFailed(e) => write!(f, "I2C0 init failed ({})", e),
            Self::GpioConfigFailed(e) => write!(f, "RESET GPIO config failed ({})", e),
        }
    }
}

impl std::error::Error for HwInitError {}

/// Bring up I2C0 and the RESET output.
pub fn init_bus(
    i2c0: I2C0,
    config: &DriverConfig,
) -> Result<(I2cDriver<'static>, PinDriver<'static, AnyOutputPin, Output>), HwInitError> {
    let i2c_cfg = I2cConfig::new()
        .baudrate(Hertz(config.bus_frequency_hz))
        .sda_enable_pullup(config.bus_pullups)
        .scl_enable_pullup(config.bus_pullups);

    // SAFETY: pin numbers come from `pins`, and each GPIO is claimed exactly
    // once here; nothing else on the board drives them.
    let (sda, scl, reset) = unsafe {
        (
            AnyIOPin::new(pins::I2C_SDA_GPIO),
            AnyIOPin::new(pins::I2C_SCL_GPIO),
            AnyOutputPin::new(pins::TLC_RESET_GPIO),
        )
    };

    let i2c = I2cDriver::new(i2c0, sda, scl, &i2c_cfg).map_err(HwInitError::I2cInitFailed)?;
    let reset = PinDriver::output(reset).map_err(HwInitError::GpioConfigFailed)?;

    info!(
        "hw_init: I2C0 at {} Hz (SDA={}, SCL={}, pull-ups {}), RESET=GPIO{}",
        config.bus_frequency_hz,
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
        if config.bus_pullups { "on" } else { "off" },
        pins::TLC_RESET_GPIO,
    );
    Ok((i2c, reset))
}
