//! JEDEC identification probe

use norcheck_core::{FlashDriver, SpiTransport};
use std::thread;
use std::time::Duration;

/// Read the JEDEC identification register, optionally in a loop
///
/// `count` of 0 keeps probing until interrupted; otherwise the register is
/// read `count` times with `interval_ms` between rounds.
pub fn run_probe(
    transport: &mut dyn SpiTransport,
    count: u32,
    interval_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut driver = FlashDriver::new(transport);

    let mut remaining = count;
    loop {
        let id = driver.read_jedec_id()?;
        println!(
            "JEDEC ID: {} (manufacturer 0x{:02X}, device 0x{:04X})",
            id,
            id.manufacturer(),
            id.device()
        );

        // All-zeros and all-ones are what a floating or unconnected bus
        // reads back
        if id.raw() == 0x000000 || id.raw() == 0xFFFFFF {
            log::warn!("bus reads {}: no chip responding?", id);
        }

        if count != 0 {
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }
        thread::sleep(Duration::from_millis(interval_ms));
    }

    Ok(())
}
