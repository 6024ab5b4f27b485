//! norcheck-dummy - In-memory flash emulator for testing
//!
//! This crate provides a dummy transport that emulates a SPI NOR flash
//! chip in memory: it decodes the raw command frames the driver puts on
//! the wire and models the chip behaviors the driver depends on - the
//! write enable latch with auto-clear, the busy bit after program and
//! erase, erase-to-0xFF, AND-style programming, in-page address
//! wraparound, and address mirroring above the chip size. Useful for
//! testing and development without real hardware.

use norcheck_core::error::{Error, Result};
use norcheck_core::spi::opcodes;
use norcheck_core::transport::SpiTransport;

/// Configuration for the dummy flash
#[derive(Debug, Clone)]
pub struct DummyConfig {
    /// JEDEC manufacturer ID
    pub manufacturer_id: u8,
    /// JEDEC device ID
    pub device_id: u16,
    /// Flash size in bytes
    pub size: usize,
    /// Page size for programming
    pub page_size: usize,
    /// Sector size for the smallest erase
    pub sector_size: usize,
    /// How many status reads report busy after a program or erase
    pub busy_polls: u32,
    /// Emulate a held write-protect pin: Write Enable never latches
    pub write_protected: bool,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            manufacturer_id: 0xEF, // Winbond
            device_id: 0x4018,     // W25Q128FV
            size: 16 * 1024 * 1024,
            page_size: 256,
            sector_size: 4096,
            busy_polls: 2,
            write_protected: false,
        }
    }
}

/// Dummy flash transport
///
/// Emulates a flash chip in memory for testing purposes. Transfers are
/// only accepted inside a chip-select window, so the driver's framing
/// discipline is checked as a side effect.
pub struct DummyFlash {
    config: DummyConfig,
    data: Vec<u8>,
    wel: bool,
    busy_polls_left: u32,
    selected: bool,
    status_reads: u32,
}

impl DummyFlash {
    /// Create a new dummy flash with the given configuration
    ///
    /// Memory starts out erased (all 0xFF).
    pub fn new(config: DummyConfig) -> Self {
        let data = vec![0xFF; config.size];
        Self {
            config,
            data,
            wel: false,
            busy_polls_left: 0,
            selected: false,
            status_reads: 0,
        }
    }

    /// Create a new dummy flash with the default configuration (W25Q128FV)
    pub fn new_default() -> Self {
        Self::new(DummyConfig::default())
    }

    /// Get a reference to the flash data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get a mutable reference to the flash data
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get the configuration
    pub fn config(&self) -> &DummyConfig {
        &self.config
    }

    /// Force the busy bit on for the next `polls` status reads
    pub fn force_busy(&mut self, polls: u32) {
        self.busy_polls_left = polls;
    }

    /// Number of status register reads seen so far
    pub fn status_reads(&self) -> u32 {
        self.status_reads
    }

    /// Current status byte; counts the read and ticks the busy model
    fn read_status_byte(&mut self) -> u8 {
        self.status_reads += 1;
        let mut status = 0u8;
        if self.busy_polls_left > 0 {
            status |= 0x01;
            self.busy_polls_left -= 1;
        }
        if self.wel {
            status |= 0x02;
        }
        status
    }

    fn handle_read(&mut self, addr: usize, read: &mut [u8]) {
        // Address mirrors at multiples of the chip size
        for (i, byte) in read.iter_mut().enumerate() {
            *byte = self.data[(addr + i) % self.config.size];
        }
    }

    fn handle_page_program(&mut self, addr: usize, data: &[u8]) {
        if !self.wel {
            log::warn!("page program at 0x{:06X} ignored: WEL not set", addr);
            return;
        }

        let addr = addr % self.config.size;
        let page_start = addr & !(self.config.page_size - 1);
        let offset = addr - page_start;

        // Programming can only change 1 -> 0, and the address wraps within
        // the page on overflow
        for (i, &byte) in data.iter().enumerate() {
            let index = page_start + (offset + i) % self.config.page_size;
            self.data[index] &= byte;
        }

        self.wel = false;
        self.busy_polls_left = self.config.busy_polls;
    }

    fn handle_sector_erase(&mut self, addr: usize) {
        if !self.wel {
            log::warn!("sector erase at 0x{:06X} ignored: WEL not set", addr);
            return;
        }

        let addr = addr % self.config.size;
        let aligned = addr & !(self.config.sector_size - 1);
        let end = (aligned + self.config.sector_size).min(self.config.size);

        // Erase sets all bytes to 0xFF
        for byte in &mut self.data[aligned..end] {
            *byte = 0xFF;
        }

        self.wel = false;
        self.busy_polls_left = self.config.busy_polls;
    }
}

/// Decode a 3-byte big-endian address from the bytes after the opcode
fn be24(bytes: &[u8]) -> Option<usize> {
    match bytes {
        [a, b, c, ..] => Some(((*a as usize) << 16) | ((*b as usize) << 8) | *c as usize),
        _ => None,
    }
}

impl SpiTransport for DummyFlash {
    fn cs_assert(&mut self) -> Result<()> {
        self.selected = true;
        Ok(())
    }

    fn cs_deassert(&mut self) -> Result<()> {
        self.selected = false;
        Ok(())
    }

    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<()> {
        if !self.selected {
            log::error!("transfer outside a chip-select window");
            return Err(Error::Transport);
        }

        let Some((&opcode, rest)) = write.split_first() else {
            log::error!("empty command frame");
            return Err(Error::Transport);
        };

        match opcode {
            opcodes::RDID => {
                if read.len() >= 3 {
                    read[0] = self.config.manufacturer_id;
                    read[1] = (self.config.device_id >> 8) as u8;
                    read[2] = self.config.device_id as u8;
                }
                Ok(())
            }

            opcodes::RDSR => {
                if let Some(first) = read.first_mut() {
                    *first = self.read_status_byte();
                }
                Ok(())
            }

            opcodes::WREN => {
                if !self.config.write_protected {
                    self.wel = true;
                }
                Ok(())
            }

            opcodes::READ => {
                let addr = be24(rest).ok_or(Error::Transport)?;
                self.handle_read(addr, read);
                Ok(())
            }

            opcodes::PP => {
                let addr = be24(rest).ok_or(Error::Transport)?;
                self.handle_page_program(addr, &rest[3..]);
                Ok(())
            }

            opcodes::SE_20 => {
                let addr = be24(rest).ok_or(Error::Transport)?;
                self.handle_sector_erase(addr);
                Ok(())
            }

            _ => {
                log::warn!("unsupported opcode 0x{:02X}", opcode);
                Err(Error::Transport)
            }
        }
    }

    fn delay_us(&mut self, _us: u32) {
        // No delay needed for in-memory operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use norcheck_core::{Error, FlashDriver, Status};

    const TEST_ADDRESS: u32 = 0x000100;

    #[test]
    fn read_jedec_id() {
        let mut flash = DummyFlash::new_default();
        let mut driver = FlashDriver::new(&mut flash);

        let id = driver.read_jedec_id().unwrap();
        assert_eq!(id.raw(), 0xEF4018);
        assert_eq!(id.manufacturer(), 0xEF);
        assert_eq!(id.device(), 0x4018);
    }

    #[test]
    fn write_enable_latches() {
        let mut flash = DummyFlash::new_default();
        let mut driver = FlashDriver::new(&mut flash);

        driver.write_enable().unwrap();
        let status = driver.read_status().unwrap();
        assert!(status.contains(Status::WEL));
    }

    #[test]
    fn write_enable_rejected_when_protected() {
        let mut flash = DummyFlash::new(DummyConfig {
            write_protected: true,
            ..DummyConfig::default()
        });
        let mut driver = FlashDriver::new(&mut flash);

        assert_eq!(
            driver.write_enable(),
            Err(Error::WriteEnableRejected { status: 0x00 })
        );
    }

    #[test]
    fn wait_ready_polls_until_busy_clears() {
        let mut flash = DummyFlash::new_default();
        flash.force_busy(3);

        let mut driver = FlashDriver::new(&mut flash);
        driver.wait_ready(10, 10_000).unwrap();
        assert!(!driver.read_status().unwrap().contains(Status::BUSY));

        // Three busy reads, then the one that observed the bit clear,
        // then the check above
        assert_eq!(flash.status_reads(), 5);
    }

    #[test]
    fn wait_ready_times_out_on_a_stuck_chip() {
        let mut flash = DummyFlash::new_default();
        flash.force_busy(u32::MAX);

        let mut driver = FlashDriver::new(&mut flash);
        assert_eq!(driver.wait_ready(10, 100), Err(Error::Timeout));
    }

    #[test]
    fn sector_erase_restores_the_erase_value() {
        let mut flash = DummyFlash::new_default();
        let sector_size = flash.config().sector_size;
        for byte in flash.data_mut() {
            *byte = 0x00;
        }

        let mut driver = FlashDriver::new(&mut flash);
        driver.sector_erase(TEST_ADDRESS).unwrap();

        // The containing sector reads back erased, the next one untouched
        let mut buf = vec![0u8; sector_size];
        driver.read(0, &mut buf).unwrap();
        assert!(buf.iter().all(|&b| b == 0xFF));

        let mut next = [0u8; 4];
        driver.read(sector_size as u32, &mut next).unwrap();
        assert_eq!(next, [0x00; 4]);
    }

    #[test]
    fn page_program_then_read_back() {
        let mut flash = DummyFlash::new_default();
        let mut driver = FlashDriver::new(&mut flash);

        driver
            .page_program(TEST_ADDRESS, &[0x78, 0x56, 0x34, 0x12])
            .unwrap();

        let mut buf = [0u8; 4];
        driver.read(TEST_ADDRESS, &mut buf).unwrap();
        assert_eq!(buf, [0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn read_fills_exactly_the_requested_length() {
        let mut flash = DummyFlash::new_default();
        let mut driver = FlashDriver::new(&mut flash);

        // Longer than one page; the driver must not cap or split it
        let mut buf = vec![0u8; 300];
        driver.read(0, &mut buf).unwrap();
        assert_eq!(buf.len(), 300);
        assert!(buf.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn program_wraps_within_the_page() {
        let mut flash = DummyFlash::new_default();
        let mut driver = FlashDriver::new(&mut flash);

        // Two bytes fit before the page boundary at 0x200; the rest wrap
        // to the start of the same page
        driver
            .page_program(0x0001FE, &[0x11, 0x22, 0x33, 0x44])
            .unwrap();

        let mut page = [0u8; 256];
        driver.read(0x000100, &mut page).unwrap();
        assert_eq!(page[0xFE], 0x11);
        assert_eq!(page[0xFF], 0x22);
        assert_eq!(page[0x00], 0x33);
        assert_eq!(page[0x01], 0x44);
        assert_eq!(page[0x02], 0xFF);
    }

    #[test]
    fn programming_only_clears_bits() {
        let mut flash = DummyFlash::new_default();
        let mut driver = FlashDriver::new(&mut flash);

        driver.page_program(TEST_ADDRESS, &[0x0F]).unwrap();
        driver.page_program(TEST_ADDRESS, &[0xF0]).unwrap();

        let mut buf = [0u8; 1];
        driver.read(TEST_ADDRESS, &mut buf).unwrap();
        assert_eq!(buf, [0x00]);
    }

    #[test]
    fn program_without_write_enable_is_ignored() {
        let mut flash = DummyFlash::new_default();

        flash.cs_assert().unwrap();
        flash
            .transfer(&[opcodes::PP, 0x00, 0x01, 0x00, 0xAA], &mut [])
            .unwrap();
        flash.cs_deassert().unwrap();

        assert_eq!(flash.data()[TEST_ADDRESS as usize], 0xFF);
    }

    #[test]
    fn transfer_requires_chip_select() {
        let mut flash = DummyFlash::new_default();
        let mut status = [0u8; 1];
        assert_eq!(
            flash.transfer(&[opcodes::RDSR], &mut status),
            Err(Error::Transport)
        );
    }
}
