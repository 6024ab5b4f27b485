//! Flash command driver
//!
//! This module implements the common SPI flash command sequences (identify,
//! status, write enable, program, erase, read) over an injected byte
//! transport, including the bounded busy-wait that program and erase
//! operations need.

use crate::error::{Error, Result};
use crate::spi::{opcodes, SpiCommand};
use crate::transport::SpiTransport;
use bitflags::bitflags;
use core::fmt;

/// Largest number of data bytes a single Page Program command may carry
pub const PAGE_SIZE: usize = 256;

/// Size of the erase unit addressed by the Sector Erase command
pub const SECTOR_SIZE: usize = 4096;

/// Opcode plus the widest supported address
const MAX_HEADER_LEN: usize = 4;

bitflags! {
    /// Status register bits
    ///
    /// Only the busy and write-enable-latch bits are interpreted; the
    /// remaining bits are carried through unchanged and can be recovered
    /// with [`Status::bits`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        /// Erase or program in progress
        const BUSY = 1 << 0;
        /// Write enable latch - writes are accepted while set
        const WEL = 1 << 1;
    }
}

/// 3-byte JEDEC identification as returned by opcode 0x9F
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JedecId(u32);

impl JedecId {
    /// Build an identifier from the three response bytes, first byte most
    /// significant
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | bytes[2] as u32)
    }

    /// The full 24-bit identifier
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// JEDEC manufacturer byte
    pub const fn manufacturer(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Device identifier (memory type and capacity bytes)
    pub const fn device(&self) -> u16 {
        self.0 as u16
    }
}

impl fmt::Display for JedecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:06X}", self.0)
    }
}

/// Timing policy for settle delays and the bounded ready-wait
///
/// Program and erase commands complete inside the chip after the command
/// frame ends; the driver sleeps a fixed settle delay, then polls the busy
/// bit until it clears or the timeout elapses.
///
/// Typical completion times for the supported commands:
/// * Page program: 0.7-5 ms
/// * 4KB sector erase: 45-400 ms
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Fixed delay after a Sector Erase command, before the first status read
    pub erase_settle_us: u32,
    /// Poll interval while waiting out a sector erase
    pub erase_poll_us: u32,
    /// Give-up bound for a sector erase
    pub erase_timeout_us: u32,
    /// Fixed delay after a Page Program command, before the first status read
    pub program_settle_us: u32,
    /// Poll interval while waiting out a page program
    pub program_poll_us: u32,
    /// Give-up bound for a page program
    pub program_timeout_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            erase_settle_us: 50_000,
            erase_poll_us: 10_000,
            erase_timeout_us: 1_000_000,
            program_settle_us: 10_000,
            program_poll_us: 10,
            program_timeout_us: 10_000,
        }
    }
}

/// SPI NOR flash command driver
///
/// Translates the high-level flash operations into correctly framed SPI
/// byte sequences over the owned transport. The driver holds no state
/// beyond the transport handle and its [`Timing`] policy; it performs no
/// internal retries and never swallows an error.
pub struct FlashDriver<T> {
    transport: T,
    timing: Timing,
}

impl<T: SpiTransport> FlashDriver<T> {
    /// Create a driver with the default timing policy
    pub fn new(transport: T) -> Self {
        Self::with_timing(transport, Timing::default())
    }

    /// Create a driver with an explicit timing policy
    pub fn with_timing(transport: T, timing: Timing) -> Self {
        Self { transport, timing }
    }

    /// Consume the driver and return the transport
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Execute one command frame within a single chip-select window
    fn execute(&mut self, cmd: &mut SpiCommand<'_>) -> Result<()> {
        let header_len = cmd.header_len();
        let frame_len = header_len + cmd.write_data.len();
        debug_assert!(frame_len <= MAX_HEADER_LEN + PAGE_SIZE);

        let mut frame = [0u8; MAX_HEADER_LEN + PAGE_SIZE];
        cmd.encode_header(&mut frame);
        frame[header_len..frame_len].copy_from_slice(cmd.write_data);

        self.transport.cs_assert()?;
        let result = self.transport.transfer(&frame[..frame_len], cmd.read_buf);
        self.transport.cs_deassert()?;
        result
    }

    /// Read the JEDEC manufacturer/device identification
    pub fn read_jedec_id(&mut self) -> Result<JedecId> {
        let mut id = [0u8; 3];
        let mut cmd = SpiCommand::read_reg(opcodes::RDID, &mut id);
        self.execute(&mut cmd)?;
        Ok(JedecId::from_bytes(id))
    }

    /// Read the status register
    pub fn read_status(&mut self) -> Result<Status> {
        let mut buf = [0u8; 1];
        let mut cmd = SpiCommand::read_reg(opcodes::RDSR, &mut buf);
        self.execute(&mut cmd)?;
        Ok(Status::from_bits_retain(buf[0]))
    }

    /// Set the write enable latch and confirm it took
    ///
    /// The latch can stay clear when the chip is hardware write protected.
    /// The driver reads the status register straight after the command and
    /// fails with [`Error::WriteEnableRejected`] if WEL is not set; whether
    /// to retry or abort is the caller's decision.
    pub fn write_enable(&mut self) -> Result<()> {
        let mut cmd = SpiCommand::simple(opcodes::WREN);
        self.execute(&mut cmd)?;

        let status = self.read_status()?;
        if !status.contains(Status::WEL) {
            return Err(Error::WriteEnableRejected {
                status: status.bits(),
            });
        }
        Ok(())
    }

    /// Poll the status register until the busy bit clears
    ///
    /// Reads the status register repeatedly, sleeping `poll_us` between
    /// polls, and returns once the busy bit is observed clear. Fails with
    /// [`Error::Timeout`] after `timeout_us` worth of polls, so a dead or
    /// disconnected chip cannot hang the caller forever.
    pub fn wait_ready(&mut self, poll_us: u32, timeout_us: u32) -> Result<()> {
        let max_polls = if poll_us > 0 {
            timeout_us / poll_us
        } else {
            timeout_us // Fall back to polling once per microsecond
        };

        for _ in 0..max_polls {
            let status = self.read_status()?;
            if !status.contains(Status::BUSY) {
                return Ok(());
            }
            if poll_us > 0 {
                self.transport.delay_us(poll_us);
            }
        }

        Err(Error::Timeout)
    }

    /// Erase the 4 KiB sector containing `addr`
    ///
    /// Sends Write Enable, then the Sector Erase command. Only the low 24
    /// bits of `addr` reach the chip, and the chip ignores the offset
    /// within the sector. After the command the driver sleeps the erase
    /// settle delay, logs the observed status register, and blocks until
    /// the busy bit clears. On success the sector reads back as the chip's
    /// erase value (0xFF on every supported part).
    pub fn sector_erase(&mut self, addr: u32) -> Result<()> {
        self.write_enable()?;

        let mut cmd = SpiCommand::erase_3b(opcodes::SE_20, addr);
        self.execute(&mut cmd)?;

        self.transport.delay_us(self.timing.erase_settle_us);
        let status = self.read_status()?;
        log::debug!(
            "status after sector erase at 0x{:06X}: 0x{:02X}",
            addr & 0xFF_FFFF,
            status.bits()
        );

        self.wait_ready(self.timing.erase_poll_us, self.timing.erase_timeout_us)
    }

    /// Program up to one page of previously erased memory
    ///
    /// Sends Write Enable, then Page Program with `data` in a single frame.
    /// The target range must have been erased first; programming can only
    /// clear bits, and the driver performs no erase-before-write check.
    /// `data` must stay within the page containing `addr`: the chip wraps
    /// the address within the page on overflow, so an overrun lands at the
    /// start of the same page rather than the next one. The driver never
    /// splits a write across pages.
    ///
    /// # Panics
    ///
    /// Panics if `data` is empty or longer than [`PAGE_SIZE`].
    pub fn page_program(&mut self, addr: u32, data: &[u8]) -> Result<()> {
        assert!(!data.is_empty());
        assert!(data.len() <= PAGE_SIZE);

        self.write_enable()?;

        let mut cmd = SpiCommand::write_3b(opcodes::PP, addr, data);
        self.execute(&mut cmd)?;

        self.transport.delay_us(self.timing.program_settle_us);
        let status = self.read_status()?;
        log::debug!(
            "status after page program at 0x{:06X}: 0x{:02X}",
            addr & 0xFF_FFFF,
            status.bits()
        );

        self.wait_ready(self.timing.program_poll_us, self.timing.program_timeout_us)
    }

    /// Read `buf.len()` bytes starting at `addr`
    ///
    /// One continuous transfer that fills `buf` exactly. The driver imposes
    /// no length cap; the transport and the chip determine the maximum
    /// continuous read. Note that `addr` is not fully decoded: only 24 bits
    /// are transferred to the device, so contents mirror at multiples of
    /// the chip size.
    pub fn read(&mut self, addr: u32, buf: &mut [u8]) -> Result<()> {
        let mut cmd = SpiCommand::read_3b(opcodes::READ, addr, buf);
        self.execute(&mut cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jedec_id_reconstruction() {
        let id = JedecId::from_bytes([0xEF, 0x40, 0x18]);
        assert_eq!(id.raw(), 0xEF4018);
        assert_eq!(id.manufacturer(), 0xEF);
        assert_eq!(id.device(), 0x4018);
    }

    #[test]
    fn status_preserves_unknown_bits() {
        let status = Status::from_bits_retain(0xA3);
        assert!(status.contains(Status::BUSY));
        assert!(status.contains(Status::WEL));
        assert_eq!(status.bits(), 0xA3);
    }
}
