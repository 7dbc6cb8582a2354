//! Ralink RT5592 / MediaTek MT7592 EEPROM decoder

use super::common::{device_identification, push_pci_ids};
use crate::error::Result;
use crate::image::EepromImage;
use crate::report::Report;

pub(crate) fn decode(image: &EepromImage) -> Result<Report> {
    let mut ident = device_identification(image);
    push_pci_ids(&mut ident, image);

    let mut report = Report::new();
    report.push(ident);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pci_ids() {
        let mut raw = vec![0u8; 0x20];
        raw[0x0a..0x0c].copy_from_slice(&0x5592u16.to_le_bytes());
        raw[0x0c..0x0e].copy_from_slice(&0x1814u16.to_le_bytes());
        let report = decode(&EepromImage::from_bytes(&raw).0).unwrap();
        let ident = report.section("Device identification").unwrap();
        assert_eq!(ident.get("PCIDevID"), Some("5592h"));
        assert_eq!(ident.get("PCIVenID"), Some("1814h"));
        assert_eq!(ident.get("PCISubsysDevID"), Some("0000h"));
    }
}
