//! Blocking `no_std` driver for the AK09918 3-axis magnetometer (Grove compass).
//!
//! The driver owns a register bus ([`bus::Bus`], with an [`embedded_hal::i2c::I2c`]
//! adapter) and a delay provider ([`embedded_hal::delay::DelayNs`]). It tracks the
//! operating mode it last set and picks the acquisition handshake from it:
//!
//! - [`OperatingMode::Normal`]: every read triggers one measurement and polls until it
//!   finishes, giving up with [`Ak09918Error::Timeout`] after a bounded number of polls.
//! - the continuous modes: the chip free-runs and a read just fetches the latest sample.
//!
//! # Quick start
//!
//! ```rust,no_run
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::i2c::I2c;
//! use ak09918_rs::{Ak09918, Ak09918Result, ErrorKind, OperatingMode};
//! use ak09918_rs::config::Configuration;
//!
//! # fn demo<I: I2c, D: DelayNs>(i2c: I, delay: D) -> Ak09918Result<(), I::Error> {
//! let mut compass = Ak09918::new_i2c(i2c, delay, Configuration::default());
//! assert!(compass.is_connected()?);
//!
//! compass.initialize(OperatingMode::Normal)?;
//! let reading = compass.read_scaled()?;
//! if reading.kind() == ErrorKind::Overflow {
//!     // the field saturated the sensor, values are still the last conversion
//! }
//! let (x_ut, y_ut, z_ut) = reading.axes();
//! # Ok(()) }
//! ```
//!
//! # Features
//!
//! - `defmt` / `log`: route the driver's internal logging to either backend.
//! - `uom`: exact [`uom`](https://docs.rs/uom) flux densities from raw readings.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod ak09918;
pub mod bus;
pub mod config;
pub mod error;
pub mod register;
pub mod sample;
pub mod timer;

#[cfg(test)]
mod testing;

pub use ak09918::{Ak09918, Ak09918Result};
pub use error::{describe, Ak09918Error, ErrorKind};
pub use register::cntl2::OperatingMode;
pub use sample::{scale_to_microtesla, Microtesla, Raw, Reading, StatusFlags};
