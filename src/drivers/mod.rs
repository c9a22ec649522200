//! Peripheral drivers and hardware initialisation.

#[cfg(target_os = "espidf")]
pub mod hw_init;
pub mod tlc59116;
