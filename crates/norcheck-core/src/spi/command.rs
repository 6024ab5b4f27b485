//! SPI command structure

use super::AddressWidth;

/// A single SPI command frame
///
/// Designed to avoid allocation - uses slices for data. The lifetime
/// parameter `'a` ties the frame to the buffers it references. A frame is
/// built fresh per operation and never persisted.
pub struct SpiCommand<'a> {
    /// The opcode byte
    pub opcode: u8,

    /// Address (if any)
    pub address: Option<u32>,

    /// Address width
    pub address_width: AddressWidth,

    /// Data clocked out after the opcode and address
    pub write_data: &'a [u8],

    /// Buffer for response bytes clocked in after the write phase (mutable)
    pub read_buf: &'a mut [u8],
}

impl<'a> SpiCommand<'a> {
    /// Create a command with no address or data (e.g., WREN)
    pub fn simple(opcode: u8) -> Self {
        Self {
            opcode,
            address: None,
            address_width: AddressWidth::None,
            write_data: &[],
            read_buf: &mut [],
        }
    }

    /// Create a read register command with no address (e.g., RDSR, RDID)
    pub fn read_reg(opcode: u8, buf: &'a mut [u8]) -> Self {
        Self {
            opcode,
            address: None,
            address_width: AddressWidth::None,
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Create a read command with 3-byte address (e.g., READ)
    pub fn read_3b(opcode: u8, addr: u32, buf: &'a mut [u8]) -> Self {
        Self {
            opcode,
            address: Some(addr),
            address_width: AddressWidth::ThreeByte,
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Create a write command with 3-byte address (e.g., PP)
    pub fn write_3b(opcode: u8, addr: u32, data: &'a [u8]) -> Self {
        Self {
            opcode,
            address: Some(addr),
            address_width: AddressWidth::ThreeByte,
            write_data: data,
            read_buf: &mut [],
        }
    }

    /// Create an erase command with 3-byte address
    pub fn erase_3b(opcode: u8, addr: u32) -> Self {
        Self {
            opcode,
            address: Some(addr),
            address_width: AddressWidth::ThreeByte,
            write_data: &[],
            read_buf: &mut [],
        }
    }

    /// Number of bytes in the opcode + address header
    pub fn header_len(&self) -> usize {
        1 + self.address_width.bytes() as usize
    }

    /// Encode the opcode and address into the start of `buf`
    ///
    /// `buf` must be at least [`header_len`](Self::header_len) bytes long.
    pub fn encode_header(&self, buf: &mut [u8]) {
        buf[0] = self.opcode;
        if let Some(address) = self.address {
            self.address_width.encode(address, &mut buf[1..]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spi::opcodes;

    #[test]
    fn simple_command_has_one_header_byte() {
        let cmd = SpiCommand::simple(opcodes::WREN);
        assert_eq!(cmd.header_len(), 1);

        let mut buf = [0u8; 1];
        cmd.encode_header(&mut buf);
        assert_eq!(buf, [0x06]);
    }

    #[test]
    fn addressed_command_encodes_opcode_then_address() {
        let cmd = SpiCommand::erase_3b(opcodes::SE_20, 0x000100);
        assert_eq!(cmd.header_len(), 4);

        let mut buf = [0u8; 4];
        cmd.encode_header(&mut buf);
        assert_eq!(buf, [0x20, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn read_command_carries_response_buffer() {
        let mut response = [0u8; 8];
        let cmd = SpiCommand::read_3b(opcodes::READ, 0xABCDEF, &mut response);

        let mut buf = [0u8; 4];
        cmd.encode_header(&mut buf);
        assert_eq!(buf, [0x03, 0xAB, 0xCD, 0xEF]);
        assert_eq!(cmd.read_buf.len(), 8);
    }
}
