//! Byte transport trait
//!
//! The driver talks to the flash chip through an injected byte-level
//! transport: a full-duplex, blocking SPI connection plus chip-select
//! control. Board- or host-specific configuration (device paths, clock
//! speed, pin numbers) belongs to the transport's constructor, not to the
//! driver.

use crate::error::Result;

/// Blocking byte-level SPI transport
///
/// One command frame occupies one chip-select window: the driver asserts
/// CS, clocks out the opcode (plus address and payload), clocks in the
/// response if any, and deasserts CS. Implementations whose underlying
/// interface frames chip select per transaction on its own (e.g. spidev)
/// may implement the CS methods as no-ops, as long as [`transfer`]
/// keeps CS asserted for the whole write-then-read exchange.
///
/// [`transfer`]: SpiTransport::transfer
pub trait SpiTransport {
    /// Drive the chip-select line active
    fn cs_assert(&mut self) -> Result<()>;

    /// Release the chip-select line
    fn cs_deassert(&mut self) -> Result<()>;

    /// Perform one full-duplex blocking transaction
    ///
    /// Clocks out all of `write`, then clocks in `read.len()` bytes, with
    /// chip select held for the duration. Fills `read` completely on
    /// success.
    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<()>;

    /// Block the calling thread for the given number of microseconds
    fn delay_us(&mut self, us: u32);
}

// Forwarding impl so the driver can run over `&mut dyn SpiTransport`
impl<T: SpiTransport + ?Sized> SpiTransport for &mut T {
    fn cs_assert(&mut self) -> Result<()> {
        (**self).cs_assert()
    }

    fn cs_deassert(&mut self) -> Result<()> {
        (**self).cs_deassert()
    }

    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<()> {
        (**self).transfer(write, read)
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}
