//! List commands implementation

use mtkeepmgr_core::chip::ChipRegistry;
use mtkeepmgr_core::Result;

/// List chips with a decoder
pub fn list_chips() {
    let registry = ChipRegistry::builtin();
    println!("Supported chips:");
    println!();
    println!("{:<10} {:>8}", "Name", "ChipID");
    println!("{}", "-".repeat(19));
    for chip in registry.iter() {
        println!("{:<10} {:>7X}h", chip.name, chip.chip_id);
    }
}

/// List image sources
pub fn list_sources() {
    println!("Supported sources:");
    println!();
    for source in mtkeepmgr_source::available_sources() {
        println!("  {:<5} - {}", source.name, source.description);
    }
}

/// List attached USB devices that can be read
#[cfg(feature = "usb")]
pub fn list_usb() -> Result<()> {
    let devices = mtkeepmgr_usb::list_devices()?;
    if devices.is_empty() {
        println!("No known USB devices found");
        println!("(use usb:<VID:PID> to read a device that is not in the table)");
        return Ok(());
    }
    println!("{:<7} {:<9} {:<14} Device", "Bus:Adr", "ID", "Path");
    for dev in devices {
        println!("{}", dev);
    }
    Ok(())
}

/// List attached USB devices that can be read
#[cfg(not(feature = "usb"))]
pub fn list_usb() -> Result<()> {
    Err(mtkeepmgr_core::Error::Config(
        "USB support is not compiled in (enable the \"usb\" feature)".into(),
    ))
}
