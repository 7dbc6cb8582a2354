//! Helpers shared by the chip decoders

use crate::image::EepromImage;
use crate::report::Section;

/// PCI identification words (MT7610 and RT5592 families)
pub(crate) const E_PCI_DEV_ID: usize = 0x000a;
pub(crate) const E_PCI_VEN_ID: usize = 0x000c;
pub(crate) const E_PCI_SUB_DEV_ID: usize = 0x0012;
pub(crate) const E_PCI_SUB_VEN_ID: usize = 0x0014;

/// Pick one of two labels depending on a flag
pub(crate) fn choice(set: bool, yes: &'static str, no: &'static str) -> &'static str {
    if set {
        yes
    } else {
        no
    }
}

/// `[Device identification]` with only the MAC address
pub(crate) fn device_identification(image: &EepromImage) -> Section {
    let mut section = Section::new("Device identification");
    section.push("MacAddr", image.mac_address());
    section
}

/// Append the PCI device/vendor/subsystem identifiers
pub(crate) fn push_pci_ids(section: &mut Section, image: &EepromImage) {
    section
        .push("PCIDevID", format!("{:04X}h", image.read_word(E_PCI_DEV_ID)))
        .push("PCIVenID", format!("{:04X}h", image.read_word(E_PCI_VEN_ID)))
        .push(
            "PCISubsysDevID",
            format!("{:04X}h", image.read_word(E_PCI_SUB_DEV_ID)),
        )
        .push(
            "PCISubsysVenID",
            format!("{:04X}h", image.read_word(E_PCI_SUB_VEN_ID)),
        );
}
