//! CLI command implementations

mod decode;
mod list;

pub use decode::run_decode;
pub use list::{list_chips, list_sources, list_usb};
