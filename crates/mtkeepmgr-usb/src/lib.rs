//! mtkeepmgr-usb - calibration data from MT76x0U USB dongles
//!
//! The dongle exposes its calibration data through a vendor control request
//! (`0x09`, offset in `wIndex`). The size of the area is not reported, so
//! it is detected by reading until the data wraps around (see [`probe`]).
//!
//! # Usage with mtkeepmgr CLI
//!
//! ```bash
//! # first known dongle
//! mtkeepmgr decode -s usb
//! # by bus and address, as shown by lsusb
//! mtkeepmgr decode -s usb:3:17
//! # any device with this ID, even if not in the known table
//! mtkeepmgr decode -s usb:0e8d:7610
//! # anything plugged behind port 2 of the hub on root port 1 of bus 1
//! mtkeepmgr decode -s usb:1/1/2/
//! ```

pub mod device;
pub mod error;
pub mod filter;
pub mod probe;
pub mod protocol;

pub use device::{list_devices, UsbConnector, UsbDeviceInfo};
pub use error::{Result, UsbError};
pub use filter::{DeviceSummary, PortPath, UsbMatchFilter};
pub use probe::{probe_image, BlockRead};

/// Create a USB connector from the selector after `usb:`
///
/// Selector errors are reported here, before any device is touched.
pub fn open_usb(selector: &str) -> mtkeepmgr_core::Result<Box<dyn mtkeepmgr_core::connector::Connector>> {
    Ok(Box::new(UsbConnector::new(selector)?))
}
