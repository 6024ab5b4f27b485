//! Error types for norcheck-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The underlying byte transport reported a failure
    ///
    /// Fatal to the in-progress operation; the driver never retries
    /// internally.
    Transport,
    /// The write enable latch did not set after a Write Enable command
    ///
    /// Carries the status byte observed after the command so the caller can
    /// inspect it. Whether to retry or abort is the caller's decision.
    WriteEnableRejected {
        /// Raw status register byte read back after the command
        status: u8,
    },
    /// The busy bit did not clear within the allowed wait
    Timeout,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "SPI transfer failed"),
            Self::WriteEnableRejected { status } => {
                write!(
                    f,
                    "write enable rejected: WEL not set (status 0x{:02X})",
                    status
                )
            }
            Self::Timeout => write!(f, "flash stayed busy past the allowed wait"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
