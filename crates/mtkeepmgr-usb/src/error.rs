//! Error types for the USB reader

use thiserror::Error;

/// USB reader errors
#[derive(Debug, Error)]
pub enum UsbError {
    /// Device list could not be obtained
    #[error("unable to obtain USB devices list: {0}")]
    Enumerate(String),

    /// No enumerated device satisfied the filter
    #[error("unable to find a matching USB device")]
    DeviceNotFound,

    /// Device could not be opened
    #[error("unable to open USB device: {0}")]
    OpenFailed(String),

    /// Control transfer failed
    #[error("unable to read EEPROM at 0x{offset:04x}: {message}")]
    TransferFailed { offset: u16, message: String },

    /// Device returned fewer bytes than requested
    #[error("read less than requested block ({got} bytes instead of {expected} bytes)")]
    ShortRead { expected: usize, got: usize },

    /// Selector string could not be parsed
    #[error("unable to parse USB selector: {0}")]
    InvalidSelector(String),

    /// Selector constraints contradict each other
    #[error("{0}")]
    ConflictingFilter(&'static str),
}

/// Result type for USB reader operations
pub type Result<T> = std::result::Result<T, UsbError>;

impl From<UsbError> for mtkeepmgr_core::Error {
    fn from(e: UsbError) -> Self {
        use mtkeepmgr_core::Error;
        match e {
            UsbError::DeviceNotFound => Error::DeviceNotFound(e.to_string()),
            UsbError::InvalidSelector(_) | UsbError::ConflictingFilter(_) => {
                Error::Config(e.to_string())
            }
            UsbError::Enumerate(_)
            | UsbError::OpenFailed(_)
            | UsbError::TransferFailed { .. }
            | UsbError::ShortRead { .. } => Error::Transfer(e.to_string()),
        }
    }
}
