#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unsafe_code)]

mod commands;
pub mod conversion;
mod driver;
mod error;
pub mod registers;
pub mod settings;

pub use driver::{Ads1220, RESET_SETTLE_TIME_US};
pub use error::{Error, PreconditionViolation};
pub use registers::{Field, Registers, check_start_preconditions};

/// SPI mode required by the ADS1220 (CPOL = 0, CPHA = 1).
pub const SPI_MODE: embedded_hal::spi::Mode = embedded_hal::spi::MODE_1;
