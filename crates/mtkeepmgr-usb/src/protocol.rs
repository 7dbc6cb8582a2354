//! MediaTek USB vendor protocol constants

use std::time::Duration;

/// A USB ID pair the reader trusts without an explicit ID filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownDevice {
    /// USB vendor ID
    pub vendor_id: u16,
    /// USB product ID
    pub product_id: u16,
    /// Product description
    pub name: &'static str,
}

/// Devices recognised without an explicit `VID:PID` clause
pub const KNOWN_DEVICES: &[KnownDevice] = &[
    KnownDevice {
        vendor_id: 0x148f,
        product_id: 0x7610,
        name: "MT7610U (default ID)",
    },
    KnownDevice {
        vendor_id: 0x148f,
        product_id: 0x761a,
        name: "TP-Link Archer T2U",
    },
];

/// Look up a VID/PID pair in [`KNOWN_DEVICES`]
pub fn known_device(vendor_id: u16, product_id: u16) -> Option<&'static KnownDevice> {
    KNOWN_DEVICES
        .iter()
        .find(|d| d.vendor_id == vendor_id && d.product_id == product_id)
}

/// Vendor request: read calibration data (wValue = 0, wIndex = offset)
pub const USB_VENDOR_EEP_READ: u8 = 0x09;

/// Bytes fetched per control transfer while probing
pub const READ_BLOCK_SZ: usize = 0x20;

/// Longest hub port chain a device path filter can hold
pub const MAX_PATH_LEN: usize = 10;

/// Control transfer timeout for a read of `size` bytes
///
/// 300 ms per full 256 bytes, never less than 300 ms.
pub fn read_timeout(size: usize) -> Duration {
    Duration::from_millis(300 * (size / 0x100).max(1) as u64)
}
