//! MediaTek MT7620 EEPROM decoder

use bitflags::bitflags;

use super::common::{choice, device_identification};
use crate::decode::Field;
use crate::error::Result;
use crate::image::EepromImage;
use crate::report::{Report, Section};

const E_NIC_CFG0: usize = 0x0034;
const E_NIC_CFG0_RX_PATH: Field = Field::new(E_NIC_CFG0, 0x000f);
const E_NIC_CFG0_TX_PATH: Field = Field::new(E_NIC_CFG0, 0x00f0);

const E_NIC_CFG1: usize = 0x0036;

const E_NIC_CFG2: usize = 0x0042;
const E_NIC_CFG2_RX_STREAM: Field = Field::new(E_NIC_CFG2, 0x000f);
const E_NIC_CFG2_TX_STREAM: Field = Field::new(E_NIC_CFG2, 0x00f0);

bitflags! {
    /// MT7620 NIC configuration word 1
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NicCfg1: u16 {
        /// External Tx ALC
        const EXT_TX_ALC = 1 << 1;
        /// External 2.4 GHz LNA
        const EXT_2G_LNA = 1 << 2;
        /// 40 MHz sideband in 2.4 GHz
        const SB_40M_2G  = 1 << 5;
        /// WPS push button enabled
        const WPS_BUT_EN = 1 << 7;
        /// 40 MHz disabled in 2.4 GHz
        const DIS_40M_2G = 1 << 8;
        /// Broadband external LNA
        const EXT_LNA    = 1 << 10;
        /// Internal Tx ALC
        const INT_TX_ALC = 1 << 13;
        /// Tx0 external PA
        const TX0_EXT_PA = 1 << 14;
        /// Tx1 external PA
        const TX1_EXT_PA = 1 << 15;
    }
}

bitflags! {
    /// MT7620 NIC configuration word 2 (flag bits only)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NicCfg2: u16 {
        /// Rx temperature compensation disabled
        const RXTEMP_C_DIS = 1 << 11;
    }
}

fn nic_configuration(image: &EepromImage) -> Section {
    let mut s = Section::new("NIC configuration");

    let val = image.read_word(E_NIC_CFG0);
    s.push("Cfg0", format!("{:04X}h", val));
    s.push_nested(1, "RxPath", E_NIC_CFG0_RX_PATH.get(val));
    s.push_nested(1, "TxPath", E_NIC_CFG0_TX_PATH.get(val));

    let val = image.read_word(E_NIC_CFG1);
    let cfg1 = NicCfg1::from_bits_retain(val);
    s.push("Cfg1", format!("{:04X}h", val));
    s.push_nested(1, "Ext. TxALC", choice(cfg1.contains(NicCfg1::EXT_TX_ALC), "Enable", "Disable"));
    s.push_nested(1, "LNA 2GHz", choice(cfg1.contains(NicCfg1::EXT_2G_LNA), "External", "Internal"));
    s.push_nested(1, "40MHz 2G SB", choice(cfg1.contains(NicCfg1::SB_40M_2G), "Enable", "Disable"));
    s.push_nested(1, "WPS button", choice(cfg1.contains(NicCfg1::WPS_BUT_EN), "Enable", "Disable"));
    s.push_nested(1, "40MHz 2GHz", choice(cfg1.contains(NicCfg1::DIS_40M_2G), "Disable", "Enable"));
    s.push_nested(1, "Ext. LNA", choice(cfg1.contains(NicCfg1::EXT_LNA), "True", "False"));
    s.push_nested(1, "Int. TxALC", choice(cfg1.contains(NicCfg1::INT_TX_ALC), "True", "False"));
    s.push_nested(1, "Tx0 PA", choice(cfg1.contains(NicCfg1::TX0_EXT_PA), "External", "Internal"));
    s.push_nested(1, "Tx1 PA", choice(cfg1.contains(NicCfg1::TX1_EXT_PA), "External", "Internal"));

    let val = image.read_word(E_NIC_CFG2);
    let cfg2 = NicCfg2::from_bits_retain(val);
    s.push("Cfg2", format!("{:04X}h", val));
    s.push_nested(1, "RxStream", E_NIC_CFG2_RX_STREAM.get(val));
    s.push_nested(1, "TxStream", E_NIC_CFG2_TX_STREAM.get(val));
    s.push_nested(1, "RxTempComp.", choice(cfg2.contains(NicCfg2::RXTEMP_C_DIS), "Disable", "Enable"));

    s
}

pub(crate) fn decode(image: &EepromImage) -> Result<Report> {
    let mut report = Report::new();
    report.push(device_identification(image));
    report.push(nic_configuration(image));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nic_configuration() {
        let mut raw = vec![0u8; 0x100];
        raw[E_NIC_CFG0..E_NIC_CFG0 + 2].copy_from_slice(&0x0012u16.to_le_bytes());
        raw[E_NIC_CFG1..E_NIC_CFG1 + 2]
            .copy_from_slice(&(NicCfg1::EXT_2G_LNA | NicCfg1::TX1_EXT_PA).bits().to_le_bytes());
        raw[E_NIC_CFG2..E_NIC_CFG2 + 2].copy_from_slice(&0x0822u16.to_le_bytes());
        let report = decode(&EepromImage::from_bytes(&raw).0).unwrap();

        let nic = report.section("NIC configuration").unwrap();
        assert_eq!(nic.get("Cfg0"), Some("0012h"));
        assert_eq!(nic.get("RxPath"), Some("2"));
        assert_eq!(nic.get("TxPath"), Some("1"));
        assert_eq!(nic.get("LNA 2GHz"), Some("External"));
        assert_eq!(nic.get("Tx0 PA"), Some("Internal"));
        assert_eq!(nic.get("Tx1 PA"), Some("External"));
        assert_eq!(nic.get("40MHz 2GHz"), Some("Enable"));
        assert_eq!(nic.get("RxStream"), Some("2"));
        assert_eq!(nic.get("TxStream"), Some("2"));
        assert_eq!(nic.get("RxTempComp."), Some("Disable"));
    }
}
