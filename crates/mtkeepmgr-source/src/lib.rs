//! mtkeepmgr-source - open image sources by name
//!
//! The CLI only talks to this crate: it turns a source string such as
//! `file:eeprom.bin` or `usb:3:17` into a [`SourceHandle`] and never names a
//! concrete connector type.
//!
//! ```text
//!            mtkeepmgr (CLI)
//!                  │
//!                  ▼
//!        mtkeepmgr-source (this crate)
//!         open_source() -> SourceHandle
//!                  │
//!         ┌────────┴────────┐
//!         ▼                 ▼
//!  mtkeepmgr-file     mtkeepmgr-usb
//!         └────────┬────────┘
//!                  ▼
//!           mtkeepmgr-core
//!    (Connector, EepromImage, chips)
//! ```

pub mod handle;
pub mod registry;

pub use handle::SourceHandle;
pub use registry::{
    available_sources, open_source, parse_source_spec, source_names_short, SourceInfo, SourceSpec,
};
