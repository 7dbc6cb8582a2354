//! Bitfield extraction from EEPROM words

use crate::image::EepromImage;

/// Extract `(word & mask) >> shift`
///
/// Masks come from static field tables and are not validated.
pub const fn field_get(word: u16, mask: u16, shift: u32) -> u16 {
    (word & mask) >> shift
}

/// Place `value` into the bits selected by `mask`, the inverse of [`field_get`]
pub const fn field_pack(value: u16, mask: u16, shift: u32) -> u16 {
    (value << shift) & mask
}

/// A masked sub-range of the word at a fixed EEPROM offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Byte offset of the containing word
    pub offset: usize,
    /// Bits belonging to the field
    pub mask: u16,
    /// Right shift applied after masking
    pub shift: u32,
}

impl Field {
    /// Field whose shift is the position of the lowest mask bit
    pub const fn new(offset: usize, mask: u16) -> Self {
        Self {
            offset,
            mask,
            shift: if mask == 0 { 0 } else { mask.trailing_zeros() },
        }
    }

    /// Low byte of the word at `offset`
    pub const fn low_byte(offset: usize) -> Self {
        Self::new(offset, 0x00ff)
    }

    /// High byte of the word at `offset`
    pub const fn high_byte(offset: usize) -> Self {
        Self::new(offset, 0xff00)
    }

    /// Extract this field from an already-read word
    pub const fn get(&self, word: u16) -> u16 {
        field_get(word, self.mask, self.shift)
    }

    /// Encode `value` into this field's bit positions
    pub const fn pack(&self, value: u16) -> u16 {
        field_pack(value, self.mask, self.shift)
    }

    /// Read the containing word from the image and extract the field
    pub fn read(&self, image: &EepromImage) -> u16 {
        self.get(image.read_word(self.offset))
    }

    /// Read a field that is at most 8 bits wide
    pub fn read_u8(&self, image: &EepromImage) -> u8 {
        self.read(image) as u8
    }

    /// Read an 8-bit field as a two's complement value
    pub fn read_i8(&self, image: &EepromImage) -> i8 {
        self.read_u8(image) as i8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_get() {
        assert_eq!(field_get(0xABCD, 0xff00, 8), 0xAB);
        assert_eq!(field_get(0xABCD, 0x00f0, 4), 0xC);
        assert_eq!(field_get(0xABCD, 0x0600, 9), 0x1);
    }

    #[test]
    fn test_field_shift_from_mask() {
        let f = Field::new(0x42, 0x0600);
        assert_eq!(f.shift, 9);
        assert_eq!(f.get(0x0400), 2);
        assert_eq!(f.pack(3), 0x0600);
        assert_eq!(Field::high_byte(0).shift, 8);
        assert_eq!(Field::new(0, 0).shift, 0);
    }

    #[test]
    fn test_field_read_from_image() {
        let (image, _) = EepromImage::from_bytes(&[0x00, 0x00, 0x34, 0xF2]);
        assert_eq!(Field::low_byte(2).read_u8(&image), 0x34);
        assert_eq!(Field::high_byte(2).read_i8(&image), -14);
        // Missing word decodes as the erased value
        assert_eq!(Field::low_byte(4).read_u8(&image), 0xff);
    }
}
