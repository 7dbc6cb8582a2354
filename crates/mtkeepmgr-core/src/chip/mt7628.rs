//! MediaTek MT7628 EEPROM decoder
//!
//! Only the common header is decoded for now.

use super::common::device_identification;
use crate::error::Result;
use crate::image::EepromImage;
use crate::report::Report;

pub(crate) fn decode(image: &EepromImage) -> Result<Report> {
    let mut report = Report::new();
    report.push(device_identification(image));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_only() {
        let mut raw = vec![0u8; 0x10];
        raw[4..10].copy_from_slice(&[0x02, 0x11, 0x22, 0x33, 0x44, 0x55]);
        let report = decode(&EepromImage::from_bytes(&raw).0).unwrap();
        assert_eq!(report.sections.len(), 1);
        assert_eq!(
            report.sections[0].get("MacAddr"),
            Some("02:11:22:33:44:55")
        );
    }
}
