//! TLC59116 LED driver firmware library.
//!
//! Exposes the driver and its pure-logic modules for integration testing
//! on the host.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod color;
pub mod config;
pub mod demo;
pub mod drivers;
pub mod error;
pub mod pins;

pub use drivers::tlc59116::Tlc59116;
pub use error::{Error, Result, TransportError};
