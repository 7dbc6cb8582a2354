//! EEPROM image buffer
//!
//! The calibration blob is an array of little-endian 16-bit words. The buffer
//! has a fixed capacity and a declared length that is always even; every read
//! at or past the declared length yields [`WORD_SENTINEL`].

use std::fmt;

/// Capacity of the image buffer in bytes
pub const EEPROM_CAPACITY: usize = 0x1000;

/// Value returned for words outside the declared image
pub const WORD_SENTINEL: u16 = 0xFFFF;

/// Common EEPROM locations shared by every supported chip
pub mod offsets {
    /// Chip identifier word
    pub const CHIP_ID: usize = 0x0000;
    /// Version word (high byte major, low byte minor)
    pub const VERSION: usize = 0x0002;
    /// MAC address bits 15..0
    pub const MAC_ADDR_15_00: usize = 0x0004;
    /// MAC address bits 31..16
    pub const MAC_ADDR_31_16: usize = 0x0006;
    /// MAC address bits 47..32
    pub const MAC_ADDR_47_32: usize = 0x0008;
}

/// Ways the declared length can differ from what the source offered
///
/// These are warnings: the image stays usable with the reduced length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeAdjustment {
    /// Source is larger than the buffer, only `kept` bytes were taken
    Truncated {
        /// Size reported by the source
        actual: u64,
        /// Bytes kept (the buffer capacity)
        kept: usize,
    },
    /// Source has an odd size, the trailing byte was dropped
    OddLength {
        /// Size reported by the source
        actual: u64,
    },
    /// USB size probe filled the buffer without detecting a wrap-around
    ProbeExhausted {
        /// Bytes read before giving up
        limit: usize,
    },
}

impl fmt::Display for SizeAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { actual, kept } => write!(
                f,
                "dump is too big ({} bytes), analysis will be limited by {} bytes",
                actual, kept
            ),
            Self::OddLength { actual } => write!(
                f,
                "dump size is not even ({} bytes), will use one byte less",
                actual
            ),
            Self::ProbeExhausted { limit } => write!(
                f,
                "EEPROM is bigger than internal buffer, analysis will be limited by {} bytes",
                limit
            ),
        }
    }
}

/// Compute the declared length for a source of `size` bytes
///
/// Oversized sources are cut to [`EEPROM_CAPACITY`]; odd sizes lose their last
/// byte. Returns the length to use and the adjustment applied, if any.
pub fn fit_length(size: u64) -> (usize, Option<SizeAdjustment>) {
    if size > EEPROM_CAPACITY as u64 {
        (
            EEPROM_CAPACITY,
            Some(SizeAdjustment::Truncated {
                actual: size,
                kept: EEPROM_CAPACITY,
            }),
        )
    } else if size % 2 != 0 {
        ((size - 1) as usize, Some(SizeAdjustment::OddLength { actual: size }))
    } else {
        (size as usize, None)
    }
}

/// EEPROM version word, split into major and minor parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    /// High byte
    pub major: u8,
    /// Low byte
    pub minor: u8,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// 48-bit MAC address in transmission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddr(pub [u8; 6]);

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// Fixed-capacity EEPROM image
///
/// Filled once by a connector, then only read. Decoders receive it by shared
/// reference.
#[derive(Clone)]
pub struct EepromImage {
    buf: Box<[u8; EEPROM_CAPACITY]>,
    len: usize,
}

impl Default for EepromImage {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EepromImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EepromImage").field("len", &self.len).finish()
    }
}

impl EepromImage {
    /// Create an empty image (declared length 0)
    pub fn new() -> Self {
        Self {
            buf: Box::new([0u8; EEPROM_CAPACITY]),
            len: 0,
        }
    }

    /// Build an image from raw bytes, applying the same length rules as the
    /// file connector
    pub fn from_bytes(data: &[u8]) -> (Self, Option<SizeAdjustment>) {
        let (len, adjustment) = fit_length(data.len() as u64);
        let mut image = Self::new();
        image.buf[..len].copy_from_slice(&data[..len]);
        image.len = len;
        (image, adjustment)
    }

    /// Buffer capacity in bytes
    pub fn capacity(&self) -> usize {
        EEPROM_CAPACITY
    }

    /// Declared length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been acquired
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The declared part of the image
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Whole backing buffer, for connectors to fill
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buf[..]
    }

    /// Set the declared length after filling the buffer
    ///
    /// The length is clamped to the capacity and rounded down to a whole word.
    pub fn set_len(&mut self, len: usize) {
        self.len = len.min(EEPROM_CAPACITY) & !1;
    }

    /// Read the little-endian word at `offset`
    ///
    /// Returns [`WORD_SENTINEL`] for any word not fully inside the declared
    /// length, so an absent field decodes the same way as an erased one.
    pub fn read_word(&self, offset: usize) -> u16 {
        match offset.checked_add(2) {
            Some(end) if end <= self.len => {
                u16::from_le_bytes([self.buf[offset], self.buf[offset + 1]])
            }
            _ => WORD_SENTINEL,
        }
    }

    /// Chip identifier
    pub fn chip_id(&self) -> u16 {
        self.read_word(offsets::CHIP_ID)
    }

    /// EEPROM layout version
    pub fn version(&self) -> Version {
        let [minor, major] = self.read_word(offsets::VERSION).to_le_bytes();
        Version { major, minor }
    }

    /// Station MAC address
    pub fn mac_address(&self) -> MacAddr {
        let mut mac = [0u8; 6];
        for (chunk, offset) in mac.chunks_exact_mut(2).zip([
            offsets::MAC_ADDR_15_00,
            offsets::MAC_ADDR_31_16,
            offsets::MAC_ADDR_47_32,
        ]) {
            chunk.copy_from_slice(&self.read_word(offset).to_le_bytes());
        }
        MacAddr(mac)
    }
}
