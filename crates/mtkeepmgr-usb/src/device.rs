//! USB connector implementation

use log::{debug, info};
use mtkeepmgr_core::connector::{AcquireState, Connector};
use mtkeepmgr_core::image::EepromImage;
use nusb::transfer::{ControlIn, ControlType, Recipient};
use nusb::MaybeFuture;

use crate::error::{Result, UsbError};
use crate::filter::{DeviceSummary, UsbMatchFilter};
use crate::probe::{probe_image, BlockRead};
use crate::protocol::{known_device, read_timeout, USB_VENDOR_EEP_READ};

/// An attached device from the known device table
#[derive(Debug, Clone)]
pub struct UsbDeviceInfo {
    /// Bus, address, IDs and port chain
    pub summary: DeviceSummary,
    /// Product description from the known device table
    pub name: &'static str,
}

impl std::fmt::Display for UsbDeviceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = &self.summary;
        let ports: Vec<String> = s.ports.iter().map(|p| p.to_string()).collect();
        write!(
            f,
            "{:03}:{:03} {:04x}:{:04x} path {}/{}  {}",
            s.bus,
            s.address,
            s.vendor_id,
            s.product_id,
            s.bus,
            ports.join("/"),
            self.name
        )
    }
}

fn summarize(info: &nusb::DeviceInfo) -> DeviceSummary {
    DeviceSummary {
        bus: info.busnum(),
        address: info.device_address(),
        vendor_id: info.vendor_id(),
        product_id: info.product_id(),
        ports: info.port_chain().to_vec(),
    }
}

fn enumerate() -> Result<Vec<nusb::DeviceInfo>> {
    let devices = nusb::list_devices()
        .wait()
        .map_err(|e| UsbError::Enumerate(e.to_string()))?
        .collect();
    Ok(devices)
}

/// List attached devices that appear in the known device table
pub fn list_devices() -> Result<Vec<UsbDeviceInfo>> {
    let devices = enumerate()?
        .iter()
        .filter_map(|info| {
            known_device(info.vendor_id(), info.product_id()).map(|known| UsbDeviceInfo {
                summary: summarize(info),
                name: known.name,
            })
        })
        .collect();
    Ok(devices)
}

/// Block reader over an opened device
struct EepromReader<'a> {
    device: &'a nusb::Device,
}

impl BlockRead for EepromReader<'_> {
    fn read_block(&mut self, offset: u16, buf: &mut [u8]) -> Result<usize> {
        let length = u16::try_from(buf.len()).map_err(|_| UsbError::TransferFailed {
            offset,
            message: format!("block of {} bytes is too large", buf.len()),
        })?;
        let data = self
            .device
            .control_in(
                ControlIn {
                    control_type: ControlType::Vendor,
                    recipient: Recipient::Device,
                    request: USB_VENDOR_EEP_READ,
                    value: 0,
                    index: offset,
                    length,
                },
                read_timeout(buf.len()),
            )
            .wait()
            .map_err(|e| UsbError::TransferFailed {
                offset,
                message: e.to_string(),
            })?;

        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }
}

/// MT76x0U calibration data reader
///
/// The selector is parsed when the connector is created so malformed or
/// conflicting selectors fail before any USB access. The device is opened
/// on [`Connector::acquire`] and closed on [`Connector::release`]. Dropping
/// the connector without a release drops the handle as well.
pub struct UsbConnector {
    filter: UsbMatchFilter,
    device: Option<nusb::Device>,
    state: AcquireState,
}

impl UsbConnector {
    /// Create a connector from a selector string
    pub fn new(selector: &str) -> Result<Self> {
        let filter = UsbMatchFilter::parse(selector)?;
        debug!("USB filter: {}", filter);
        Ok(Self::with_filter(filter))
    }

    /// Create a connector from an already parsed filter
    pub fn with_filter(filter: UsbMatchFilter) -> Self {
        Self {
            filter,
            device: None,
            state: AcquireState::Unacquired,
        }
    }

    /// The device filter in use
    pub fn filter(&self) -> &UsbMatchFilter {
        &self.filter
    }

    /// True while a device handle is held
    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    fn load(&mut self, image: &mut EepromImage) -> Result<()> {
        let devices = enumerate()?;
        let summaries: Vec<DeviceSummary> = devices.iter().map(summarize).collect();
        let index = self.filter.select(&summaries)?;

        info!("Opening USB device {}", summaries[index]);
        let device = devices[index]
            .open()
            .wait()
            .map_err(|e| UsbError::OpenFailed(e.to_string()))?;
        let device = self.device.insert(device);

        let mut reader = EepromReader { device };
        probe_image(&mut reader, image)?;
        debug!("Detected EEPROM size: {} bytes", image.len());
        Ok(())
    }
}

impl Connector for UsbConnector {
    fn name(&self) -> &'static str {
        "USB"
    }

    fn acquire(&mut self, image: &mut EepromImage) -> mtkeepmgr_core::Result<()> {
        self.state = AcquireState::Acquiring;
        match self.load(image) {
            Ok(()) => {
                self.state = AcquireState::Acquired;
                Ok(())
            }
            Err(e) => {
                self.state = AcquireState::Failed;
                Err(e.into())
            }
        }
    }

    fn release(&mut self) {
        if self.device.take().is_some() {
            debug!("Closed USB device");
        }
    }

    fn state(&self) -> AcquireState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_selector_fails_before_usb_access() {
        assert!(matches!(
            UsbConnector::new("3:4,1/2"),
            Err(UsbError::ConflictingFilter(_))
        ));
        assert!(matches!(
            UsbConnector::new("nonsense"),
            Err(UsbError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_release_without_acquire() {
        let mut conn = UsbConnector::new("any").unwrap();
        assert_eq!(conn.state(), AcquireState::Unacquired);
        assert!(conn.filter().is_empty());
        conn.release();
        conn.release();
        assert!(!conn.is_open());
    }

    #[test]
    fn test_device_info_display() {
        let info = UsbDeviceInfo {
            summary: DeviceSummary {
                bus: 1,
                address: 12,
                vendor_id: 0x148f,
                product_id: 0x761a,
                ports: vec![2, 3],
            },
            name: "TP-Link Archer T2U",
        };
        assert_eq!(
            info.to_string(),
            "001:012 148f:761a path 1/2/3  TP-Link Archer T2U"
        );
    }
}
