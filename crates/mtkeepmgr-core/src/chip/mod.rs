//! Chip registry and per-chip decoders
//!
//! The registry is a static table mapping the 16-bit chip identifier stored at
//! offset 0 of the image to a decode routine. Several identifiers may share a
//! routine when the parts use the same EEPROM layout (MT7610/MT7612,
//! RT5592/MT7592).

mod common;
mod mt7601;
mod mt7610;
mod mt7620;
mod mt7628;
mod rt5592;

use crate::error::{Error, Result};
use crate::image::EepromImage;
use crate::report::{Report, Section};

pub use mt7610::{NicCfg0 as Mt7610NicCfg0, NicCfg1 as Mt7610NicCfg1, NicCfg2 as Mt7610NicCfg2};
pub use mt7620::{NicCfg1 as Mt7620NicCfg1, NicCfg2 as Mt7620NicCfg2};

/// Signature of a chip decode routine
pub type DecodeFn = fn(&EepromImage) -> Result<Report>;

/// Registry entry
#[derive(Debug, Clone, Copy)]
pub struct ChipDescriptor {
    /// Display name
    pub name: &'static str,
    /// Identifier stored at offset 0 of the image
    pub chip_id: u16,
    /// Decoder for this chip's layout
    pub decode: DecodeFn,
}

/// All supported chips
pub static CHIPS: &[ChipDescriptor] = &[
    ChipDescriptor {
        name: "MT7601",
        chip_id: 0x7601,
        decode: mt7601::decode,
    },
    ChipDescriptor {
        name: "MT7610",
        chip_id: 0x7610,
        decode: mt7610::decode,
    },
    ChipDescriptor {
        name: "MT7612",
        chip_id: 0x7612,
        decode: mt7610::decode,
    },
    ChipDescriptor {
        name: "MT7620",
        chip_id: 0x7620,
        decode: mt7620::decode,
    },
    ChipDescriptor {
        name: "MT7628",
        chip_id: 0x7628,
        decode: mt7628::decode,
    },
    ChipDescriptor {
        name: "RT5592",
        chip_id: 0x5592,
        decode: rt5592::decode,
    },
    ChipDescriptor {
        name: "MT7592",
        chip_id: 0x7592,
        decode: rt5592::decode,
    },
];

/// Read-only lookup table of chip descriptors
#[derive(Debug, Clone, Copy)]
pub struct ChipRegistry {
    chips: &'static [ChipDescriptor],
}

impl ChipRegistry {
    /// Registry over an arbitrary static table
    pub const fn new(chips: &'static [ChipDescriptor]) -> Self {
        Self { chips }
    }

    /// Registry of every chip this crate knows about
    pub const fn builtin() -> Self {
        Self::new(CHIPS)
    }

    /// Number of registered chips
    pub fn len(&self) -> usize {
        self.chips.len()
    }

    /// True if the table is empty
    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    /// Iterate over all descriptors in table order
    pub fn iter(&self) -> impl Iterator<Item = &'static ChipDescriptor> {
        self.chips.iter()
    }

    /// First descriptor whose identifier equals `chip_id`
    pub fn find(&self, chip_id: u16) -> Option<&'static ChipDescriptor> {
        self.chips.iter().find(|c| c.chip_id == chip_id)
    }

    /// Identify the chip that produced `image`
    pub fn identify(&self, image: &EepromImage) -> Result<&'static ChipDescriptor> {
        let chip_id = image.chip_id();
        self.find(chip_id)
            .ok_or(Error::UnsupportedChip { chip_id })
    }

    /// Identify the chip and run its decoder
    pub fn identify_and_dispatch(
        &self,
        image: &EepromImage,
    ) -> Result<(&'static ChipDescriptor, Report)> {
        let chip = self.identify(image)?;
        log::debug!("Dispatching to {} decoder (ChipID {:04X}h)", chip.name, chip.chip_id);
        let report = (chip.decode)(image)?;
        Ok((chip, report))
    }
}

impl Default for ChipRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Build the `[EEPROM identification]` section
///
/// `chip` is `None` when identification failed; the raw identifier and
/// version are still reported.
pub fn identification_section(image: &EepromImage, chip: Option<&ChipDescriptor>) -> Section {
    let mut section = Section::new("EEPROM identification");
    section.push("ChipID", format!("{:04X}h", image.chip_id()));
    section.push("Version", image.version());
    if let Some(chip) = chip {
        section.push("Chip", chip.name);
    }
    section
}
