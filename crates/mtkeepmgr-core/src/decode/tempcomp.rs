//! Temperature compensation tables
//!
//! The EEPROM stores N calibration points as signed bytes, two per word with
//! the high byte first. The table used by the radio has N+1 entries: a neutral
//! zero point is inserted in the middle for the reference temperature, and
//! every entry is shifted by the per-device temperature offset. Sums saturate
//! at the `i8` range instead of wrapping.

use crate::image::EepromImage;

/// Read `count` signed calibration points starting at `base`
pub fn read_points(image: &EepromImage, base: usize, count: usize) -> Vec<i8> {
    let mut points = Vec::with_capacity(count + 1);
    for i in (0..count).step_by(2) {
        let [hi, lo] = image.read_word(base + i).to_be_bytes();
        points.push(hi as i8);
        points.push(lo as i8);
    }
    points.truncate(count);
    points
}

/// Add `offset` to `point`, saturating at the `i8` bounds
pub fn clamp_adjust(point: i8, offset: i8) -> i8 {
    (point as i16 + offset as i16).clamp(i8::MIN as i16, i8::MAX as i16) as i8
}

/// Temperature compensation curve centred on the reference temperature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempCompTable {
    entries: Vec<i8>,
}

impl TempCompTable {
    /// Build the table from raw points and a temperature offset
    pub fn build(points: &[i8], temp_offset: i8) -> Self {
        let mid = points.len() / 2;
        let mut entries = Vec::with_capacity(points.len() + 1);
        entries.extend_from_slice(&points[..mid]);
        entries.push(0);
        entries.extend_from_slice(&points[mid..]);

        for entry in entries.iter_mut() {
            *entry = clamp_adjust(*entry, temp_offset);
        }

        Self { entries }
    }

    /// Read `count` points from the image and build the table
    pub fn read(image: &EepromImage, base: usize, count: usize, temp_offset: i8) -> Self {
        Self::build(&read_points(image, base, count), temp_offset)
    }

    /// All entries, lowest temperature first
    pub fn entries(&self) -> &[i8] {
        &self.entries
    }

    /// Index of the inserted reference point
    pub fn reference_index(&self) -> usize {
        self.entries.len().saturating_sub(1) / 2
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if built from zero points
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_inserts_neutral_point() {
        let points: Vec<i8> = (1..=14).collect();
        let table = TempCompTable::build(&points, 0);
        assert_eq!(table.len(), 15);
        assert_eq!(table.reference_index(), 7);
        assert_eq!(table.entries()[7], 0);
        assert_eq!(&table.entries()[..7], &points[..7]);
        assert_eq!(&table.entries()[8..], &points[7..]);
    }

    #[test]
    fn test_build_applies_offset_to_every_entry() {
        let table = TempCompTable::build(&[-2, -1, 1, 2], 3);
        assert_eq!(table.entries(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_clamp_saturates() {
        assert_eq!(clamp_adjust(120, 10), 127);
        assert_eq!(clamp_adjust(-120, -10), -128);
        assert_eq!(clamp_adjust(i8::MAX, i8::MAX), 127);
        assert_eq!(clamp_adjust(i8::MIN, i8::MIN), -128);
        assert_eq!(clamp_adjust(5, -7), -2);
    }

    #[test]
    fn test_read_points_high_byte_first() {
        let (image, _) = EepromImage::from_bytes(&[0xfe, 0x03, 0x05, 0x80]);
        assert_eq!(read_points(&image, 0, 4), vec![3, -2, -128, 5]);
        assert_eq!(read_points(&image, 0, 3), vec![3, -2, -128]);
    }

    #[test]
    fn test_read_erased_points() {
        let image = EepromImage::new();
        let table = TempCompTable::read(&image, 0, 14, 0);
        assert_eq!(table.len(), 15);
        assert!(table
            .entries()
            .iter()
            .enumerate()
            .all(|(i, &e)| if i == 7 { e == 0 } else { e == -1 }));
    }
}
