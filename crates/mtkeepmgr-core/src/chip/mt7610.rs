//! MediaTek MT7610 / MT7612 EEPROM decoder

use bitflags::bitflags;

use super::common::{choice, device_identification, push_pci_ids};
use crate::decode::{read_channel_powers, Field, PowerRange, SignedDelta, TempCompTable};
use crate::error::Result;
use crate::image::EepromImage;
use crate::report::{Report, Section};

const E_CMB_AUX_OPT: usize = 0x0022;
const E_XTAL_OPT: usize = 0x0024;

const E_NIC_CFG0: usize = 0x0034;
const E_NIC_CFG0_RX_PATH: Field = Field::new(E_NIC_CFG0, 0x000f);
const E_NIC_CFG0_TX_PATH: Field = Field::new(E_NIC_CFG0, 0x00f0);

const E_NIC_CFG1: usize = 0x0036;

const E_COUNTRY_REGION: usize = 0x0038;
const E_COUNTRY_REGION_5G: Field = Field::low_byte(E_COUNTRY_REGION);
const E_COUNTRY_REGION_2G: Field = Field::high_byte(E_COUNTRY_REGION);

const E_FREQ_OFFSET_FO: Field = Field::low_byte(0x003a);

const E_NIC_CFG2: usize = 0x0042;
const E_NIC_CFG2_RX_STREAM: Field = Field::new(E_NIC_CFG2, 0x000f);
const E_NIC_CFG2_TX_STREAM: Field = Field::new(E_NIC_CFG2, 0x00f0);
const E_NIC_CFG2_XTAL_OPT: Field = Field::new(E_NIC_CFG2, 0x0600);

const E_LNA_GAIN_2G: Field = Field::low_byte(0x0044);
const E_LNA_GAIN_5G_0: Field = Field::high_byte(0x0044);
const E_RSSI_OFFSET_2G_0: Field = Field::low_byte(0x0046);
const E_RSSI_OFFSET_2G_1: Field = Field::high_byte(0x0046);
const E_LNA_GAIN_5G_1: Field = Field::high_byte(0x0048);
const E_RSSI_OFFSET_5G_0: Field = Field::low_byte(0x004a);
const E_RSSI_OFFSET_5G_1: Field = Field::high_byte(0x004a);
const E_LNA_GAIN_5G_2: Field = Field::high_byte(0x004c);

const E_40M_PWR_DELTA_2G: Field = Field::low_byte(0x0050);
const E_40M_PWR_DELTA_5G: Field = Field::high_byte(0x0050);
const E_80M_PWR_DELTA_5G: Field = Field::low_byte(0x0052);

const E_CH_PWR_2G_BASE: usize = 0x0058;
const E_CH_PWR_5G_0_BASE: usize = 0x0078;
const E_CH_PWR_5G_1_BASE: usize = 0x0084;
const E_CH_PWR_5G_2_BASE: usize = 0x0096;

const E_TEMP_COMP_2G_BASE: usize = 0x00a8;
const E_TEMP_COMP_5G_BASE: usize = 0x00b6;
const TEMP_COMP_POINTS: usize = 14;

const E_TEMP_OFFSET_VAL: Field = Field::high_byte(0x00d0);

const E_5G_SUBBANDS_MID_CH: Field = Field::low_byte(0x00dc);
const E_5G_SUBBANDS_HIG_CH: Field = Field::high_byte(0x00dc);

/// Valid per-channel power bytes, in 0.5 dBm steps
const CH_PWR: PowerRange = PowerRange {
    min: 0x00,
    max: 0x3f,
    default: 0x14,
};

bitflags! {
    /// MT7610 NIC configuration word 0 (flag bits only)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NicCfg0: u16 {
        /// Internal 2.4 GHz PA
        const INT_2G_PA    = 0x0100;
        /// Internal 5 GHz PA
        const INT_5G_PA    = 0x0200;
        /// External PA current selection (set = 8 mA)
        const EXT_PA_CURR  = 0x0400;
    }
}

bitflags! {
    /// MT7610 NIC configuration word 1
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NicCfg1: u16 {
        /// Hardware radio control
        const HW_RF_CTRL   = 0x0001;
        /// Dynamic Tx AGC
        const DYN_TX_AGC   = 0x0002;
        /// External 2.4 GHz LNA
        const EXT_2G_LNA   = 0x0004;
        /// External 5 GHz LNA
        const EXT_5G_LNA   = 0x0008;
        /// CardBus acceleration disabled
        const CB_ACCEL_DIS = 0x0010;
        /// 40 MHz sideband in 2.4 GHz
        const SB_40M_2G    = 0x0020;
        /// 40 MHz sideband in 5 GHz
        const SB_40M_5G    = 0x0040;
        /// WPS push button enabled
        const WPS_BUT_EN   = 0x0080;
        /// 40 MHz disabled in 2.4 GHz
        const DIS_40M_2G   = 0x0100;
        /// 40 MHz disabled in 5 GHz
        const DIS_40M_5G   = 0x0200;
        /// Antenna diversity
        const ANT_DIV      = 0x0800;
        /// Antenna option
        const ANT_OPT      = 0x1000;
        /// Internal Tx ALC
        const INT_TX_ALC   = 0x2000;
        /// Bluetooth coexistence
        const COEX         = 0x4000;
        /// DAC test
        const DAC_TEST     = 0x8000;
    }
}

bitflags! {
    /// MT7610 NIC configuration word 2 (flag bits only)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NicCfg2: u16 {
        /// Coexistence antenna
        const COEX_ANT     = 0x0100;
        /// Rx temperature compensation disabled
        const RXTEMP_C_DIS = 0x0800;
        /// Calibration data lives in flash
        const CAL_IN_FLASH = 0x1000;
    }
}

struct Subband {
    name: &'static str,
    base: usize,
    channels: &'static [u16],
}

const SUBBANDS: &[Subband] = &[
    Subband {
        name: "2.4 GHz",
        base: E_CH_PWR_2G_BASE,
        channels: &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14],
    },
    Subband {
        name: "5 GHz (low)",
        base: E_CH_PWR_5G_0_BASE,
        channels: &[36, 38, 40, 44, 46, 48, 52, 54, 56, 60, 62, 64],
    },
    Subband {
        name: "5 GHz (middle)",
        base: E_CH_PWR_5G_1_BASE,
        channels: &[
            100, 102, 104, 108, 110, 112, 116, 118, 120, 124, 126, 128, 132, 134, 136, 140,
        ],
    },
    Subband {
        name: "5 GHz (high)",
        base: E_CH_PWR_5G_2_BASE,
        channels: &[149, 151, 153, 157, 159, 161, 165, 167, 169, 171, 173],
    },
];

fn country_code(code: u16) -> String {
    if code == 0xff {
        "<none>".to_string()
    } else {
        code.to_string()
    }
}

fn device_configuration(image: &EepromImage) -> Section {
    let mut s = Section::new("Device configuration");
    s.push("CMB aux option", format!("{:04X}h", image.read_word(E_CMB_AUX_OPT)));
    s.push("XTAL option", format!("{:04X}h", image.read_word(E_XTAL_OPT)));

    let val = image.read_word(E_NIC_CFG0);
    let cfg0 = NicCfg0::from_bits_retain(val);
    s.push("RxPath", E_NIC_CFG0_RX_PATH.get(val));
    s.push("TxPath", E_NIC_CFG0_TX_PATH.get(val));
    s.push("PA 2GHz", choice(cfg0.contains(NicCfg0::INT_2G_PA), "Internal", "External"));
    s.push("PA 5GHz", choice(cfg0.contains(NicCfg0::INT_5G_PA), "Internal", "External"));
    s.push("PA current", choice(cfg0.contains(NicCfg0::EXT_PA_CURR), "8 mA", "16 mA"));

    let cfg1 = NicCfg1::from_bits_retain(image.read_word(E_NIC_CFG1));
    s.push("RF Ctrl", choice(cfg1.contains(NicCfg1::HW_RF_CTRL), "Hw", "Driver"));
    s.push("DynTxAgcCtrl", choice(cfg1.contains(NicCfg1::DYN_TX_AGC), "Enable", "Disable"));
    s.push("LNA 2GHz", choice(cfg1.contains(NicCfg1::EXT_2G_LNA), "External", "Internal"));
    s.push("LNA 5GHz", choice(cfg1.contains(NicCfg1::EXT_5G_LNA), "External", "Internal"));
    s.push("CardBus Accel", choice(cfg1.contains(NicCfg1::CB_ACCEL_DIS), "Disable", "Enable"));
    s.push("40MHz 2GHz SB", choice(cfg1.contains(NicCfg1::SB_40M_2G), "Enable", "Disable"));
    s.push("40MHz 5GHz SB", choice(cfg1.contains(NicCfg1::SB_40M_5G), "Enable", "Disable"));
    s.push("WPS button", choice(cfg1.contains(NicCfg1::WPS_BUT_EN), "Enable", "Disable"));
    s.push("40MHz 2GHz", choice(cfg1.contains(NicCfg1::DIS_40M_2G), "Disable", "Enable"));
    s.push("40MHz 5GHz", choice(cfg1.contains(NicCfg1::DIS_40M_5G), "Disable", "Enable"));
    s.push("Ant. diversity", choice(cfg1.contains(NicCfg1::ANT_DIV), "True", "False"));
    s.push("Ant. opt.", choice(cfg1.contains(NicCfg1::ANT_OPT), "True", "False"));
    s.push("Internal TxALC", choice(cfg1.contains(NicCfg1::INT_TX_ALC), "True", "False"));
    s.push("Coexistence", choice(cfg1.contains(NicCfg1::COEX), "True", "False"));
    s.push("DAC test", choice(cfg1.contains(NicCfg1::DAC_TEST), "True", "False"));

    let val = image.read_word(E_NIC_CFG2);
    let cfg2 = NicCfg2::from_bits_retain(val);
    s.push("RxStream", E_NIC_CFG2_RX_STREAM.get(val));
    s.push("TxStream", E_NIC_CFG2_TX_STREAM.get(val));
    s.push("CoexAnt", choice(cfg2.contains(NicCfg2::COEX_ANT), "True", "False"));
    s.push("CalibInFlash", choice(cfg2.contains(NicCfg2::CAL_IN_FLASH), "True", "False"));
    s.push("XtalOpt", E_NIC_CFG2_XTAL_OPT.get(val));
    s.push("RxTempCompens.", choice(cfg2.contains(NicCfg2::RXTEMP_C_DIS), "Disable", "Enable"));

    s.push("FreqOffset", format!("{:02X}h", E_FREQ_OFFSET_FO.read(image)));
    s.push("TempOffset", E_TEMP_OFFSET_VAL.read_i8(image));
    s.push("5GHz mid chan", E_5G_SUBBANDS_MID_CH.read(image));
    s.push("5GHz high chan", E_5G_SUBBANDS_HIG_CH.read(image));
    s
}

fn country_region(image: &EepromImage) -> Section {
    let mut s = Section::new("Country region code");
    s.push("5GHz country", country_code(E_COUNTRY_REGION_5G.read(image)));
    s.push("2GHz country", country_code(E_COUNTRY_REGION_2G.read(image)));
    s
}

fn lna_gain(image: &EepromImage) -> Section {
    let mut s = Section::new("External LNA gain");
    s.push("2GHz (1-14)", format!("{} dB", E_LNA_GAIN_2G.read(image)));
    s.push("5GHz (36-64)", format!("{} dB", E_LNA_GAIN_5G_0.read(image)));
    s.push("5GHz (100-128)", format!("{} dB", E_LNA_GAIN_5G_1.read(image)));
    s.push("5GHz (132-173)", format!("{} dB", E_LNA_GAIN_5G_2.read(image)));
    s
}

fn rssi_offsets(image: &EepromImage) -> Section {
    let mut s = Section::new("BBP RSSI offsets");
    s.push("2GHz Offset0", format!("{} dB", E_RSSI_OFFSET_2G_0.read_i8(image)));
    s.push("2GHz Offset1", format!("{} dB", E_RSSI_OFFSET_2G_1.read_i8(image)));
    s.push("5GHz Offset0", format!("{} dB", E_RSSI_OFFSET_5G_0.read_i8(image)));
    s.push("5GHz Offset1", format!("{} dB", E_RSSI_OFFSET_5G_1.read_i8(image)));
    s
}

fn power_delta(image: &EepromImage) -> Section {
    let mut s = Section::new("Tx power delta");
    s.push("2GHz 40MHz", SignedDelta::decode(E_40M_PWR_DELTA_2G.read_u8(image)));
    s.push("5GHz 40MHz", SignedDelta::decode(E_40M_PWR_DELTA_5G.read_u8(image)));
    s.push("5GHz 80MHz", SignedDelta::decode(E_80M_PWR_DELTA_5G.read_u8(image)));
    s
}

fn channel_power(image: &EepromImage) -> Section {
    let mut s = Section::new("Per channel power table");
    for sb in SUBBANDS {
        let powers = read_channel_powers(image, sb.base, sb.channels.len(), &CH_PWR);
        let channels: Vec<String> = sb.channels.iter().map(|c| format!("{:>5}", c)).collect();
        let dbm: Vec<String> = powers.iter().map(|p| format!("{:>5.1}", p.dbm())).collect();
        s.push("Subband", sb.name);
        s.push_nested(1, "Channel", channels.join(""));
        s.push_nested(1, "Power, dBm", dbm.join(""));
    }
    s
}

fn temp_compensation(image: &EepromImage) -> Section {
    let offset = E_TEMP_OFFSET_VAL.read_i8(image);
    let mut s = Section::new("Tx temperature compensation");
    for (name, base) in [("2GHz", E_TEMP_COMP_2G_BASE), ("5GHz", E_TEMP_COMP_5G_BASE)] {
        let table = TempCompTable::read(image, base, TEMP_COMP_POINTS, offset);
        let entries: Vec<String> = table.entries().iter().map(|e| format!("{:>5}", e)).collect();
        s.push(name, entries.join(""));
    }
    s
}

pub(crate) fn decode(image: &EepromImage) -> Result<Report> {
    let mut ident = device_identification(image);
    push_pci_ids(&mut ident, image);

    let mut report = Report::new();
    report.push(ident);
    report.push(device_configuration(image));
    report.push(country_region(image));
    report.push(lna_gain(image));
    report.push(rssi_offsets(image));
    report.push(power_delta(image));
    report.push(channel_power(image));
    report.push(temp_compensation(image));
    Ok(report)
}
