//! mtkeepmgr-file - raw EEPROM dump files as an image source
//!
//! A dump is the EEPROM contents byte for byte, as written by vendor tools or
//! by reading `/sys/kernel/debug/ieee80211/phy*/mt76/eeprom`.
//!
//! # Example
//!
//! ```ignore
//! use mtkeepmgr_core::connector::Connector;
//! use mtkeepmgr_core::image::EepromImage;
//! use mtkeepmgr_file::{FileConfig, FileConnector};
//!
//! let mut conn = FileConnector::new(&FileConfig::new("eeprom.bin"));
//! let mut image = EepromImage::new();
//! conn.acquire(&mut image)?;
//! conn.release();
//! ```
//!
//! # Usage with mtkeepmgr CLI
//!
//! ```bash
//! mtkeepmgr decode -s file:eeprom.bin
//! # the prefix may be omitted
//! mtkeepmgr decode -s eeprom.bin
//! ```

pub mod device;
pub mod error;

pub use device::{FileConfig, FileConnector};
pub use error::{FileError, Result};

/// Open a dump file source and return it as a boxed connector
///
/// `path` is the part of the source string after `file:`.
pub fn open_file(path: &str) -> mtkeepmgr_core::Result<Box<dyn mtkeepmgr_core::connector::Connector>> {
    if path.is_empty() {
        return Err(mtkeepmgr_core::Error::Config(
            "file source requires a path (file:<path>)".into(),
        ));
    }
    Ok(Box::new(FileConnector::new(&FileConfig::new(path))))
}
