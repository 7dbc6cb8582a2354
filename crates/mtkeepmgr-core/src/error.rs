//! Error types for mtkeepmgr-core
//!
//! Every failure that can end a run is funnelled into [`Error`]. Connector
//! crates keep their own error enums and convert into this one at the
//! connector boundary.

use std::io;
use thiserror::Error;

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Open/stat/read or USB transfer failure
    Io,
    /// USB enumeration finished without a qualifying device
    DeviceNotFound,
    /// Chip identifier is not in the registry
    UnsupportedChip,
    /// Conflicting or malformed source configuration
    Config,
}

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error with the operation that failed
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted (e.g. "unable to open dump file 'x.bin'")
        context: String,
        /// Underlying system error
        #[source]
        source: io::Error,
    },

    /// USB control transfer failed or returned less data than requested
    #[error("USB transfer failed: {0}")]
    Transfer(String),

    /// No device matched the selector
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// EEPROM dump belongs to a chip we have no decoder for
    #[error("EEPROM dump is for unknown or unsupported chip (ChipID {chip_id:04X}h)")]
    UnsupportedChip {
        /// Identifier read from offset 0 of the image
        chip_id: u16,
    },

    /// Invalid source selector or conflicting filter constraints
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build an [`Error::Io`] from a context message and an I/O error
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } | Error::Transfer(_) => ErrorKind::Io,
            Error::DeviceNotFound(_) => ErrorKind::DeviceNotFound,
            Error::UnsupportedChip { .. } => ErrorKind::UnsupportedChip,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias using the core Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let e = Error::io("unable to read", io::Error::from(io::ErrorKind::UnexpectedEof));
        assert_eq!(e.kind(), ErrorKind::Io);
        assert_eq!(Error::Transfer("short read".into()).kind(), ErrorKind::Io);
        assert_eq!(
            Error::DeviceNotFound("no match".into()).kind(),
            ErrorKind::DeviceNotFound
        );
        assert_eq!(
            Error::UnsupportedChip { chip_id: 0 }.kind(),
            ErrorKind::UnsupportedChip
        );
        assert_eq!(Error::Config("bad".into()).kind(), ErrorKind::Config);
    }

    #[test]
    fn test_unsupported_chip_message_has_id() {
        let msg = Error::UnsupportedChip { chip_id: 0x1234 }.to_string();
        assert!(msg.contains("1234h"));
    }
}
