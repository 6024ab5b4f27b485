//! CLI argument parsing

use crate::transports;
use clap::{Parser, Subcommand};

/// Parse a string as a hex or decimal u32
pub fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Generate dynamic help text for the transport argument
fn transport_help() -> String {
    format!(
        "Transport to use [available: {}]",
        transports::transport_names_short()
    )
}

#[derive(Parser)]
#[command(name = "norcheck")]
#[command(author, version, about = "SPI NOR flash diagnostic tool", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe the JEDEC identification register
    Probe {
        /// Transport to use
        #[arg(short, long, help = transport_help())]
        transport: String,

        /// Number of probe rounds (0 = keep probing until interrupted)
        #[arg(long, default_value = "1")]
        count: u32,

        /// Pause between probe rounds in milliseconds
        #[arg(long, default_value = "4000")]
        interval_ms: u64,
    },

    /// Run an erase/program/read self-test at a fixed address
    Selftest {
        /// Transport to use
        #[arg(short, long, help = transport_help())]
        transport: String,

        /// Test address (hex or decimal); the containing sector is erased
        #[arg(long, value_parser = parse_hex_u32, default_value = "0x000100")]
        address: u32,

        /// 32-bit test value programmed at the address (little-endian)
        #[arg(long, value_parser = parse_hex_u32, default_value = "0x12345678")]
        value: u32,
    },

    /// List supported transports
    ListTransports,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_decimal() {
        assert_eq!(parse_hex_u32("0x000100"), Ok(0x100));
        assert_eq!(parse_hex_u32("0X12345678"), Ok(0x12345678));
        assert_eq!(parse_hex_u32("256"), Ok(256));
        assert!(parse_hex_u32("0xZZ").is_err());
        assert!(parse_hex_u32("twelve").is_err());
    }
}
