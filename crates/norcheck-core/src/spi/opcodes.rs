//! SPI NOR flash command opcodes
//!
//! The fixed command bytes of the 25-series flash protocol, as defined by
//! the chip datasheets and common JEDEC convention.

/// Write Enable - sets the write enable latch, required before any
/// program or erase command
pub const WREN: u8 = 0x06;
/// Read Status Register (1 response byte)
pub const RDSR: u8 = 0x05;
/// Page Program with 3-byte address (up to 256 data bytes)
pub const PP: u8 = 0x02;
/// Read Data with 3-byte address (continuous response)
pub const READ: u8 = 0x03;
/// Sector Erase 4KB with 3-byte address
pub const SE_20: u8 = 0x20;
/// Read JEDEC ID (3 response bytes: manufacturer, memory type, capacity)
pub const RDID: u8 = 0x9F;
