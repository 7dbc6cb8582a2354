//! USB device selection
//!
//! Selector grammar (clauses joined by `,`, all clauses must hold):
//!
//! - `""` or `any` - no constraint, first known device wins
//! - `VVVV:PPPP` or `0xVVVV:0xPPPP` - vendor/product ID in hex; also allows
//!   devices that are not in the known device table
//! - `bus:addr` - bus number and device address in decimal
//! - `bus/port[/port...]` - exact hub port chain on a bus
//! - `bus/port[/port...]/` - port chain prefix on a bus
//!
//! A device address and a port path cannot be combined.

use crate::error::{Result, UsbError};
use crate::protocol::{known_device, MAX_PATH_LEN};
use log::{debug, warn};
use std::fmt;

/// Hub port chain constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortPath {
    /// Ports from the root hub down
    pub ports: heapless::Vec<u8, MAX_PATH_LEN>,
    /// Device chain must have exactly these ports, not just start with them
    pub exact: bool,
}

impl PortPath {
    /// True if `chain` satisfies this constraint
    pub fn matches(&self, chain: &[u8]) -> bool {
        if chain.len() < self.ports.len() {
            return false;
        }
        if self.exact && chain.len() != self.ports.len() {
            return false;
        }
        chain[..self.ports.len()] == self.ports[..]
    }
}

/// Parsed device selector
///
/// Every `None` field is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsbMatchFilter {
    /// Bus number
    pub bus: Option<u8>,
    /// Device address on the bus
    pub address: Option<u8>,
    /// Vendor and product ID
    pub id: Option<(u16, u16)>,
    /// Hub port chain
    pub path: Option<PortPath>,
}

/// The attributes of an enumerated device that filtering looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSummary {
    /// Bus number
    pub bus: u8,
    /// Device address
    pub address: u8,
    /// USB vendor ID
    pub vendor_id: u16,
    /// USB product ID
    pub product_id: u16,
    /// Hub ports from the root hub down
    pub ports: Vec<u8>,
}

impl fmt::Display for DeviceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bus={},addr={},vid={:04x},pid={:04x}",
            self.bus, self.address, self.vendor_id, self.product_id
        )
    }
}

fn parse_dec_u8(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_hex_u16(s: &str) -> Option<u16> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(s, 16).ok()
}

fn parse_id(clause: &str) -> Option<(u16, u16)> {
    let (vid, pid) = clause.split_once(':')?;
    let (vid, pid) = match (vid.strip_prefix("0x"), pid.strip_prefix("0x")) {
        (Some(vid), Some(pid)) => (vid, pid),
        (None, None) => (vid, pid),
        _ => return None,
    };
    Some((parse_hex_u16(vid)?, parse_hex_u16(pid)?))
}

fn parse_bus_addr(clause: &str) -> Option<(u8, u8)> {
    let (bus, addr) = clause.split_once(':')?;
    Some((parse_dec_u8(bus)?, parse_dec_u8(addr)?))
}

fn parse_path(clause: &str) -> Result<(u8, PortPath)> {
    let (bus, rest) = clause
        .split_once('/')
        .ok_or_else(|| UsbError::InvalidSelector(format!("not a device path -- {}", clause)))?;
    let bus = parse_dec_u8(bus).ok_or_else(|| {
        UsbError::InvalidSelector(format!(
            "unable to parse bus number of device path -- {}",
            clause
        ))
    })?;

    let (body, exact) = match rest.strip_suffix('/') {
        Some(body) => (body, false),
        None => (rest, true),
    };
    if body.is_empty() {
        return Err(UsbError::InvalidSelector(
            "device path should include at least one hub port".into(),
        ));
    }

    let mut ports = heapless::Vec::new();
    for (i, port) in body.split('/').enumerate() {
        let port = parse_dec_u8(port).ok_or_else(|| {
            UsbError::InvalidSelector(format!(
                "unable to parse port {} in the device path -- {}",
                i + 1,
                clause
            ))
        })?;
        ports.push(port).map_err(|_| {
            UsbError::InvalidSelector(format!(
                "too long device path, maximum allowed length is {} port elements",
                MAX_PATH_LEN
            ))
        })?;
    }

    Ok((bus, PortPath { ports, exact }))
}

impl UsbMatchFilter {
    /// Parse a selector string
    pub fn parse(selector: &str) -> Result<Self> {
        let mut filter = Self::default();
        if selector.is_empty() || selector.eq_ignore_ascii_case("any") {
            return Ok(filter);
        }

        for clause in selector.split(',') {
            if let Some(id) = parse_id(clause) {
                filter.id = Some(id);
            } else if let Some((bus, addr)) = parse_bus_addr(clause) {
                filter.bus = Some(bus);
                filter.address = Some(addr);
            } else if clause.contains('/') {
                let (bus, path) = parse_path(clause)?;
                filter.bus = Some(bus);
                filter.path = Some(path);
            } else {
                return Err(UsbError::InvalidSelector(format!(
                    "unable to parse argument token -- {}",
                    clause
                )));
            }
        }

        if filter.address.is_some() && filter.path.is_some() {
            return Err(UsbError::ConflictingFilter(
                "unable to use device address and device path filters simultaneously",
            ));
        }

        Ok(filter)
    }

    /// True if no constraint is set
    pub fn is_empty(&self) -> bool {
        self.bus.is_none() && self.address.is_none() && self.id.is_none() && self.path.is_none()
    }

    /// Check one device against the filter
    ///
    /// Constraints are checked in order bus, address, port path, then ID.
    /// Without an ID constraint only devices from the known device table
    /// qualify.
    pub fn matches(&self, dev: &DeviceSummary) -> bool {
        if self.bus.is_some_and(|bus| bus != dev.bus) {
            return false;
        }
        if self.address.is_some_and(|addr| addr != dev.address) {
            return false;
        }
        if let Some(path) = &self.path {
            if dev.ports.len() > MAX_PATH_LEN {
                warn!(
                    "device {} has path length greater than {} elements and will be skipped",
                    dev, MAX_PATH_LEN
                );
                return false;
            }
            if !path.matches(&dev.ports) {
                return false;
            }
        }

        let known = known_device(dev.vendor_id, dev.product_id).is_some();
        match self.id {
            Some((vid, pid)) => {
                if dev.vendor_id != vid || dev.product_id != pid {
                    return false;
                }
                if !known {
                    warn!(
                        "device {} has unknown VID/PID, but match is forced by the filter",
                        dev
                    );
                }
                true
            }
            None if !known => {
                if !self.is_empty() {
                    warn!("device {} has unknown VID/PID and will be skipped", dev);
                }
                false
            }
            None => true,
        }
    }

    /// Index of the first device that matches
    pub fn select(&self, devices: &[DeviceSummary]) -> Result<usize> {
        let index = devices
            .iter()
            .position(|dev| self.matches(dev))
            .ok_or(UsbError::DeviceNotFound)?;
        debug!("Selected USB device {}", devices[index]);
        Ok(index)
    }
}

impl fmt::Display for UsbMatchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "any");
        }
        let mut clauses = Vec::new();
        if let Some((vid, pid)) = self.id {
            clauses.push(format!("{:04x}:{:04x}", vid, pid));
        }
        match (self.bus, self.address, &self.path) {
            (Some(bus), Some(addr), _) => clauses.push(format!("{}:{}", bus, addr)),
            (Some(bus), None, Some(path)) => {
                let ports: Vec<String> = path.ports.iter().map(|p| p.to_string()).collect();
                let tail = if path.exact { "" } else { "/" };
                clauses.push(format!("{}/{}{}", bus, ports.join("/"), tail));
            }
            _ => {}
        }
        write!(f, "{}", clauses.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev(bus: u8, address: u8, vid: u16, pid: u16, ports: &[u8]) -> DeviceSummary {
        DeviceSummary {
            bus,
            address,
            vendor_id: vid,
            product_id: pid,
            ports: ports.to_vec(),
        }
    }

    fn path(ports: &[u8], exact: bool) -> PortPath {
        PortPath {
            ports: heapless::Vec::from_slice(ports).unwrap(),
            exact,
        }
    }

    #[test]
    fn test_parse_any() {
        assert!(UsbMatchFilter::parse("").unwrap().is_empty());
        assert!(UsbMatchFilter::parse("any").unwrap().is_empty());
        assert!(UsbMatchFilter::parse("ANY").unwrap().is_empty());
    }

    #[test]
    fn test_parse_id() {
        let f = UsbMatchFilter::parse("148f:761a").unwrap();
        assert_eq!(f.id, Some((0x148f, 0x761a)));
        let f = UsbMatchFilter::parse("0x0e8d:0x7610").unwrap();
        assert_eq!(f.id, Some((0x0e8d, 0x7610)));
        assert!(UsbMatchFilter::parse("0x148f:761a").is_err());
    }

    #[test]
    fn test_parse_bus_addr() {
        let f = UsbMatchFilter::parse("3:17").unwrap();
        assert_eq!(f.bus, Some(3));
        assert_eq!(f.address, Some(17));
        assert!(UsbMatchFilter::parse("3:256").is_err());
    }

    #[test]
    fn test_parse_path() {
        let f = UsbMatchFilter::parse("1/2/3").unwrap();
        assert_eq!(f.bus, Some(1));
        assert_eq!(f.path, Some(path(&[2, 3], true)));

        let f = UsbMatchFilter::parse("1/2/").unwrap();
        assert_eq!(f.path, Some(path(&[2], false)));

        assert!(UsbMatchFilter::parse("1/").is_err());
        assert!(UsbMatchFilter::parse("x/2").is_err());
        assert!(UsbMatchFilter::parse("1/2//").is_err());
        assert!(UsbMatchFilter::parse("1/300").is_err());
        assert!(UsbMatchFilter::parse("1/1/2/3/4/5/6/7/8/9/10").is_ok());
        assert!(UsbMatchFilter::parse("1/1/2/3/4/5/6/7/8/9/10/11").is_err());
    }

    #[test]
    fn test_parse_combined() {
        let f = UsbMatchFilter::parse("148f:7610,1/4/").unwrap();
        assert_eq!(f.id, Some((0x148f, 0x7610)));
        assert_eq!(f.bus, Some(1));
        assert!(f.path.is_some());
        assert_eq!(f.to_string(), "148f:7610,1/4/");
    }

    #[test]
    fn test_parse_last_clause_wins() {
        let f = UsbMatchFilter::parse("148f:7610,0e8d:7612").unwrap();
        assert_eq!(f.id, Some((0x0e8d, 0x7612)));

        let f = UsbMatchFilter::parse("1:2,3:4").unwrap();
        assert_eq!(f.bus, Some(3));
        assert_eq!(f.address, Some(4));
        assert!(f.path.is_none());

        let f = UsbMatchFilter::parse("1/2/,3/4").unwrap();
        assert_eq!(f.bus, Some(3));
        assert_eq!(f.address, None);
        assert_eq!(f.path, Some(path(&[4], true)));
    }

    #[test]
    fn test_parse_conflict() {
        let err = UsbMatchFilter::parse("1:2,1/3").unwrap_err();
        assert!(matches!(err, UsbError::ConflictingFilter(_)));
        let core: mtkeepmgr_core::Error = err.into();
        assert_eq!(core.kind(), mtkeepmgr_core::ErrorKind::Config);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(UsbMatchFilter::parse("hello").is_err());
        assert!(UsbMatchFilter::parse("1:2,").is_err());
    }

    #[test]
    fn test_port_path_prefix_and_exact() {
        assert!(path(&[1, 2], false).matches(&[1, 2, 3]));
        assert!(!path(&[1, 2], true).matches(&[1, 2, 3]));
        assert!(path(&[1, 2], true).matches(&[1, 2]));
        assert!(!path(&[1, 2], false).matches(&[1]));
        assert!(!path(&[1, 3], false).matches(&[1, 2]));
    }

    #[test]
    fn test_select_first_known() {
        let devices = [
            dev(1, 1, 0x1d6b, 0x0002, &[]),
            dev(1, 5, 0x148f, 0x761a, &[2]),
            dev(2, 3, 0x148f, 0x7610, &[1]),
        ];
        let f = UsbMatchFilter::default();
        assert_eq!(f.select(&devices).unwrap(), 1);

        let f = UsbMatchFilter::parse("2:3").unwrap();
        assert_eq!(f.select(&devices).unwrap(), 2);
    }

    #[test]
    fn test_select_forced_id() {
        let devices = [dev(1, 1, 0x1d6b, 0x0002, &[]), dev(1, 7, 0x0e8d, 0x7612, &[3])];
        assert!(matches!(
            UsbMatchFilter::default().select(&devices),
            Err(UsbError::DeviceNotFound)
        ));
        let f = UsbMatchFilter::parse("0e8d:7612").unwrap();
        assert_eq!(f.select(&devices).unwrap(), 1);
    }

    #[test]
    fn test_select_by_path() {
        let devices = [
            dev(1, 4, 0x148f, 0x7610, &[1, 4]),
            dev(1, 9, 0x148f, 0x7610, &[2, 1]),
        ];
        let f = UsbMatchFilter::parse("1/2/").unwrap();
        assert_eq!(f.select(&devices).unwrap(), 1);
        let f = UsbMatchFilter::parse("1/2").unwrap();
        assert!(f.select(&devices).is_err());
    }

    #[test]
    fn test_select_skips_overlong_path() {
        let deep: Vec<u8> = (1..=11).collect();
        let devices = [dev(1, 4, 0x148f, 0x7610, &deep)];
        let f = UsbMatchFilter::parse("1/1/").unwrap();
        assert!(f.select(&devices).is_err());
    }

    #[test]
    fn test_not_found_maps_to_core_kind() {
        let core: mtkeepmgr_core::Error = UsbError::DeviceNotFound.into();
        assert_eq!(core.kind(), mtkeepmgr_core::ErrorKind::DeviceNotFound);
    }
}
