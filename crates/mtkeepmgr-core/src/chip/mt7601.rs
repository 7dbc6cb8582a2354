//! MediaTek MT7601 EEPROM decoder

use super::common::device_identification;
use crate::error::Result;
use crate::image::EepromImage;
use crate::report::Report;

pub(crate) fn decode(image: &EepromImage) -> Result<Report> {
    let mut report = Report::new();
    report.push(device_identification(image));
    Ok(report)
}
