//! Decode command implementation

use mtkeepmgr_core::chip::{identification_section, ChipRegistry};
use mtkeepmgr_core::image::EepromImage;
use mtkeepmgr_core::report::Report;
use mtkeepmgr_core::{ErrorKind, Result};
use mtkeepmgr_source::open_source;

/// Identify the chip behind `image` and decode it
///
/// The identification section comes first and is followed by the chip's
/// own sections.
pub fn decode_image(registry: &ChipRegistry, image: &EepromImage) -> Result<Report> {
    let (chip, chip_report) = registry.identify_and_dispatch(image)?;
    log::info!("Detected {} (EEPROM version {})", chip.name, image.version());

    let mut report = Report::new();
    report.push(identification_section(image, Some(chip)));
    report.sections.extend(chip_report.sections);
    Ok(report)
}

/// Acquire the image from `source`, decode it and print the report
pub fn run_decode(source: &str) -> Result<()> {
    let image = {
        let mut handle = open_source(source)?;
        log::info!("Reading EEPROM image from {} source", handle.name());
        handle.acquire()?
        // source released here
    };
    log::debug!("EEPROM image is {} bytes", image.len());

    let registry = ChipRegistry::builtin();
    match decode_image(&registry, &image) {
        Ok(report) => {
            print!("{}", report);
            Ok(())
        }
        Err(e) => {
            // Still show what was read so the dump can be recognised
            if e.kind() == ErrorKind::UnsupportedChip {
                print!("{}", identification_section(&image, None));
            }
            Err(e)
        }
    }
}
