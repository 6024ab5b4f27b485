//! Transport registration and dispatch
//!
//! This module provides a centralized registry for the byte transports the
//! tool can drive, with feature-gated inclusion and dynamic help text.

use norcheck_core::SpiTransport;

/// Information about a transport
pub struct TransportInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all transports enabled at compile time
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_transports() -> Vec<TransportInfo> {
    let mut transports = Vec::new();

    #[cfg(feature = "dummy")]
    transports.push(TransportInfo {
        name: "dummy",
        aliases: &[],
        description: "In-memory flash chip emulator for testing",
    });

    #[cfg(feature = "linux-spi")]
    transports.push(TransportInfo {
        name: "linux_spi",
        aliases: &["linux-spi", "spidev"],
        description: "Linux spidev interface (dev=/dev/spidevX.Y,spispeed=<kHz>,mode=<0-3>)",
    });

    transports
}

/// Generate help text listing all available transports
pub fn transport_help() -> String {
    let transports = available_transports();

    if transports.is_empty() {
        return "No transports available (recompile with transport features enabled)".to_string();
    }

    let mut help = String::from("Available transports:\n");
    for t in &transports {
        help.push_str(&format!("  {:12} - {}\n", t.name, t.description));
    }
    help
}

/// Generate a short list of transport names for CLI help
pub fn transport_names_short() -> String {
    let transports = available_transports();
    let names: Vec<&str> = transports.iter().map(|t| t.name).collect();
    names.join(", ")
}

/// Parse a transport string into name and options
///
/// Format: "name" or "name:option1=value1,option2=value2"
pub fn parse_transport_string(s: &str) -> (&str, Vec<(&str, &str)>) {
    if let Some((name, opts)) = s.split_once(':') {
        let options: Vec<_> = opts
            .split(',')
            .filter_map(|opt| opt.split_once('='))
            .collect();
        (name, options)
    } else {
        (s, Vec::new())
    }
}

/// Execute a function with the specified transport
///
/// The transport string can be just the name (e.g., "dummy") or include
/// parameters (e.g., "linux_spi:dev=/dev/spidev0.0").
#[allow(unused_variables)]
pub fn with_transport<F>(transport: &str, f: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&mut dyn SpiTransport) -> Result<(), Box<dyn std::error::Error>>,
{
    let (name, options) = parse_transport_string(transport);

    match name {
        #[cfg(feature = "dummy")]
        "dummy" => {
            let mut transport = norcheck_dummy::DummyFlash::new_default();
            f(&mut transport)
        }

        #[cfg(feature = "linux-spi")]
        "linux_spi" | "linux-spi" | "spidev" => {
            let config = norcheck_linux_spi::parse_options(&options)
                .map_err(|e| format!("Invalid linux_spi parameters: {}", e))?;

            log::info!("Opening Linux SPI transport...");
            let mut transport = norcheck_linux_spi::LinuxSpi::open(&config).map_err(|e| {
                format!(
                    "Failed to open Linux SPI device: {}\n\
                     Make sure the device exists and you have read/write permissions.\n\
                     You may need to: sudo usermod -aG spi $USER",
                    e
                )
            })?;
            f(&mut transport)
        }

        _ => Err(unknown_transport_error(name)),
    }
}

fn unknown_transport_error(name: &str) -> Box<dyn std::error::Error> {
    let mut msg = format!("Unknown transport: {}\n\n", name);
    msg.push_str(&transport_help());
    msg.push_str("\nUse 'norcheck list-transports' for more details");
    msg.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_has_no_options() {
        let (name, options) = parse_transport_string("dummy");
        assert_eq!(name, "dummy");
        assert!(options.is_empty());
    }

    #[test]
    fn options_split_on_commas() {
        let (name, options) = parse_transport_string("linux_spi:dev=/dev/spidev0.0,spispeed=1000");
        assert_eq!(name, "linux_spi");
        assert_eq!(
            options,
            vec![("dev", "/dev/spidev0.0"), ("spispeed", "1000")]
        );
    }
}
