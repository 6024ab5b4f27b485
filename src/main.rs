//! norcheck - SPI NOR flash diagnostic tool
//!
//! Exercises an external SPI NOR flash chip through its command protocol:
//! probes the JEDEC identification register and runs a scripted
//! erase/program/read self-test at a fixed address. The byte transport is
//! injected, so the same checks run against real hardware (Linux spidev)
//! or the in-memory chip emulator.

mod cli;
mod commands;
mod transports;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Verbosity raises the default filter; RUST_LOG still wins
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Probe {
            transport,
            count,
            interval_ms,
        } => transports::with_transport(&transport, |t| {
            commands::probe::run_probe(t, count, interval_ms)
        }),
        Commands::Selftest {
            transport,
            address,
            value,
        } => transports::with_transport(&transport, |t| {
            commands::selftest::run_selftest(t, address, value)
        }),
        Commands::ListTransports => {
            commands::list_transports();
            Ok(())
        }
    }
}
