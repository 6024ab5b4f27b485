//! norcheck-linux-spi - Linux spidev transport
//!
//! This crate provides flash access through Linux's spidev interface,
//! the `/dev/spidevX.Y` character devices exposed by spidev-enabled SPI
//! controllers.
//!
//! # Example
//!
//! ```no_run
//! use norcheck_core::FlashDriver;
//! use norcheck_linux_spi::{LinuxSpi, LinuxSpiConfig};
//!
//! // Open with default settings (1 MHz, mode 0)
//! let spi = LinuxSpi::open_device("/dev/spidev0.0")?;
//!
//! // Or with custom settings
//! let config = LinuxSpiConfig::new("/dev/spidev0.0")
//!     .with_speed(4_000_000) // 4 MHz
//!     .with_mode(0);
//! let spi = LinuxSpi::open(&config)?;
//!
//! let mut driver = FlashDriver::new(spi);
//! println!("JEDEC ID: {}", driver.read_jedec_id()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Usage with the norcheck CLI
//!
//! ```bash
//! # Probe the chip with default settings
//! norcheck probe -t linux_spi:dev=/dev/spidev0.0
//!
//! # Specify SPI speed in kHz and mode
//! norcheck selftest -t linux_spi:dev=/dev/spidev0.0,spispeed=1000,mode=0
//! ```
//!
//! # System Requirements
//!
//! - Linux kernel with spidev support enabled (`CONFIG_SPI_SPIDEV`)
//! - Read/write access to the `/dev/spidevX.Y` device
//! - May require adding the user to the `spi` group or udev rules

pub mod device;
pub mod error;

pub use device::{mode, parse_options, LinuxSpi, LinuxSpiConfig};
pub use error::{LinuxSpiError, Result};
