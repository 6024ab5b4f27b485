//! Scripted erase/program/read self-test

use norcheck_core::{FlashDriver, SpiTransport};

/// Run the erase/program/read sequence at `address`
///
/// The bring-up check for a freshly wired chip: read the initial contents,
/// erase the containing sector, verify the erased state, program a 4-byte
/// little-endian value, read it back and compare. Any step that does not
/// match fails the whole test.
pub fn run_selftest(
    transport: &mut dyn SpiTransport,
    address: u32,
    value: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut driver = FlashDriver::new(transport);

    let id = driver.read_jedec_id()?;
    println!("JEDEC ID: {}", id);

    let mut initial = [0u8; 4];
    driver.read(address, &mut initial)?;
    println!("Initial value at 0x{:06X}: {:02X?}", address, initial);

    println!("Erasing sector at 0x{:06X}...", address);
    driver.sector_erase(address)?;

    let mut erased = [0u8; 4];
    driver.read(address, &mut erased)?;
    println!("Post-erase value: {:02X?}", erased);
    if erased != [0xFF; 4] {
        return Err(format!("sector did not erase to 0xFF: {:02X?}", erased).into());
    }

    let data = value.to_le_bytes();
    println!("Programming 0x{:08X} ({:02X?})...", value, data);
    driver.page_program(address, &data)?;

    let mut readback = [0u8; 4];
    driver.read(address, &mut readback)?;
    println!("Read bytes: {:02X?}", readback);
    println!("Read value: 0x{:08X}", u32::from_le_bytes(readback));

    if readback != data {
        return Err(format!("read back {:02X?}, expected {:02X?}", readback, data).into());
    }

    println!("Self-test PASSED");
    Ok(())
}
