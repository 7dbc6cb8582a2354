//! Per-channel Tx power values

use crate::decode::field::Field;
use crate::image::EepromImage;

/// Accepted raw range and replacement value for channel power bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerRange {
    /// Lowest valid raw value (inclusive)
    pub min: u8,
    /// Highest valid raw value (inclusive)
    pub max: u8,
    /// Value used when the raw byte is out of range
    pub default: u8,
}

impl PowerRange {
    /// True if `raw` lies inside `[min, max]`
    pub fn is_valid(&self, raw: u8) -> bool {
        (self.min..=self.max).contains(&raw)
    }

    /// Validate a raw byte, substituting the default when out of range
    pub fn sanitize(&self, raw: u8) -> ChannelPower {
        if self.is_valid(raw) {
            ChannelPower {
                raw,
                value: raw,
                substituted: false,
            }
        } else {
            ChannelPower {
                raw,
                value: self.default,
                substituted: true,
            }
        }
    }
}

/// A validated channel power, in 0.5 dBm steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPower {
    /// Byte as stored
    pub raw: u8,
    /// Byte after default substitution
    pub value: u8,
    /// The default replaced the stored byte
    pub substituted: bool,
}

impl ChannelPower {
    /// Power in dBm
    pub fn dbm(&self) -> f32 {
        self.value as f32 / 2.0
    }
}

/// Read `count` channel power bytes starting at `base`
///
/// Each word holds two channels, the low byte is the lower channel.
pub fn read_channel_powers(
    image: &EepromImage,
    base: usize,
    count: usize,
    range: &PowerRange,
) -> Vec<ChannelPower> {
    let mut powers = Vec::with_capacity(count + 1);
    for ci in (0..count).step_by(2) {
        let word = image.read_word(base + ci);
        powers.push(range.sanitize(Field::low_byte(0).get(word) as u8));
        powers.push(range.sanitize(Field::high_byte(0).get(word) as u8));
    }
    powers.truncate(count);
    powers
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: PowerRange = PowerRange {
        min: 0x02,
        max: 0x3f,
        default: 0x14,
    };

    #[test]
    fn test_range_inclusive() {
        assert!(!RANGE.is_valid(0x01));
        assert!(RANGE.is_valid(0x02));
        assert!(RANGE.is_valid(0x3f));
        assert!(!RANGE.is_valid(0x40));
    }

    #[test]
    fn test_sanitize_substitutes_default() {
        let p = RANGE.sanitize(0xff);
        assert!(p.substituted);
        assert_eq!(p.value, 0x14);
        assert_eq!(p.dbm(), 10.0);

        let p = RANGE.sanitize(0x21);
        assert!(!p.substituted);
        assert_eq!(p.dbm(), 16.5);
    }

    #[test]
    fn test_read_channel_powers_odd_count() {
        let (image, _) = EepromImage::from_bytes(&[0x10, 0x11, 0x12, 0x13, 0x14, 0x99]);
        let powers = read_channel_powers(&image, 0, 5, &RANGE);
        let values: Vec<u8> = powers.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0x10, 0x11, 0x12, 0x13, 0x14]);
    }

    #[test]
    fn test_read_channel_powers_past_end() {
        let (image, _) = EepromImage::from_bytes(&[0x10, 0x11]);
        let powers = read_channel_powers(&image, 0, 4, &RANGE);
        assert_eq!(powers.len(), 4);
        assert!(!powers[1].substituted);
        assert!(powers[2].substituted);
        assert!(powers[3].substituted);
    }
}
