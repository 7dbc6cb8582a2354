//! Sign-magnitude delta bytes
//!
//! Power deltas are stored as one byte: an enable bit, a sign bit (set means
//! increase) and a magnitude in the remaining low bits. An erased byte
//! (`0xFF`) means "use the default", which is reported separately from an
//! explicitly disabled delta even though both decode to zero.

use std::fmt;

/// Raw byte value meaning "not programmed, use default"
pub const DELTA_DEFAULT: u8 = 0xff;

/// Bit layout of a sign-magnitude delta byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaFormat {
    /// Enable bit mask
    pub enable: u8,
    /// Sign bit mask (set = positive)
    pub sign: u8,
    /// Magnitude mask, shifted down to its lowest set bit
    pub magnitude: u8,
}

/// Layout used by Tx power delta bytes
pub const PWR_DELTA: DeltaFormat = DeltaFormat {
    enable: 0x80,
    sign: 0x40,
    magnitude: 0x3f,
};

/// Decoded delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedDelta {
    /// Enable bit was set and the byte was not the default sentinel
    pub enabled: bool,
    /// Byte was the default sentinel
    pub is_default: bool,
    /// Signed value in the unit of the field (0 unless enabled)
    pub value: i16,
}

impl SignedDelta {
    /// Decode a Tx power delta byte
    pub fn decode(raw: u8) -> Self {
        Self::decode_with(raw, &PWR_DELTA)
    }

    /// Decode a byte with an explicit bit layout
    pub fn decode_with(raw: u8, format: &DeltaFormat) -> Self {
        if raw == DELTA_DEFAULT {
            return Self {
                enabled: false,
                is_default: true,
                value: 0,
            };
        }
        if raw & format.enable == 0 {
            return Self {
                enabled: false,
                is_default: false,
                value: 0,
            };
        }

        let shift = if format.magnitude == 0 {
            0
        } else {
            format.magnitude.trailing_zeros()
        };
        let magnitude = ((raw & format.magnitude) >> shift) as i16;
        let value = if raw & format.sign != 0 {
            magnitude
        } else {
            -magnitude
        };

        Self {
            enabled: true,
            is_default: false,
            value,
        }
    }

    /// Value in dB, for fields stored in 0.5 dB steps
    pub fn half_db(&self) -> f32 {
        self.value as f32 / 2.0
    }
}

impl fmt::Display for SignedDelta {
    /// Formats a 0.5 dBm step delta
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default {
            write!(f, "0 dBm (default)")
        } else {
            write!(f, "{:.1} dBm", self.half_db())
        }
    }
}
