//! mtkeepmgr-core - EEPROM calibration image decoding
//!
//! This crate holds everything that does not depend on where an EEPROM image
//! came from:
//!
//! - [`image`] - the fixed-capacity image buffer and its word accessors
//! - [`decode`] - generic bitfield extraction and the numeric helpers used by
//!   chip decoders (sign-magnitude deltas, channel power validation,
//!   temperature compensation tables)
//! - [`chip`] - the static chip registry and the per-chip decoders
//! - [`connector`] - the trait implemented by image sources (file, USB)
//! - [`report`] - the structured, printable output of a decoder
//!
//! # Example
//!
//! ```
//! use mtkeepmgr_core::chip::ChipRegistry;
//! use mtkeepmgr_core::image::EepromImage;
//!
//! let mut raw = vec![0u8; 0x200];
//! raw[0..2].copy_from_slice(&0x7610u16.to_le_bytes());
//! let (image, _) = EepromImage::from_bytes(&raw);
//!
//! let registry = ChipRegistry::builtin();
//! let (chip, report) = registry.identify_and_dispatch(&image)?;
//! assert_eq!(chip.name, "MT7610");
//! println!("{}", report);
//! # Ok::<(), mtkeepmgr_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod chip;
pub mod connector;
pub mod decode;
pub mod error;
pub mod image;
pub mod report;

pub use error::{Error, ErrorKind, Result};
