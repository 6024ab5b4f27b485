//! norcheck-core - SPI NOR flash command protocol driver
//!
//! This crate implements the fixed command/address framing used by
//! 25-series SPI NOR flash chips: JEDEC identification, status register
//! reads, write enable, page program, sector erase, and continuous data
//! reads, plus a bounded poll until the chip reports ready. It is designed
//! to be `no_std` compatible for use in embedded environments.
//!
//! The driver owns an injected byte transport (see [`transport::SpiTransport`])
//! and holds no other state; every operation builds its command frame fresh
//! and completes before returning.
//!
//! # Features
//!
//! - `std` - Enable standard library support (`std::error::Error` impl)
//!
//! # Example
//!
//! ```ignore
//! use norcheck_core::{FlashDriver, SpiTransport};
//!
//! fn identify<T: SpiTransport>(transport: T) {
//!     let mut driver = FlashDriver::new(transport);
//!     match driver.read_jedec_id() {
//!         Ok(id) => println!("JEDEC ID: {}", id),
//!         Err(e) => println!("probe failed: {}", e),
//!     }
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod driver;
pub mod error;
pub mod spi;
pub mod transport;

pub use driver::{FlashDriver, JedecId, Status, Timing, PAGE_SIZE, SECTOR_SIZE};
pub use error::{Error, Result};
pub use transport::SpiTransport;
