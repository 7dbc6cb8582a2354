//! Property-based tests for the size detection probe

use mtkeepmgr_core::image::{EepromImage, SizeAdjustment};
use mtkeepmgr_usb::protocol::READ_BLOCK_SZ;
use mtkeepmgr_usb::{probe_image, BlockRead};
use proptest::prelude::*;

/// Simulated dongle whose calibration area repeats with period `data.len()`
struct SimulatedDongle {
    data: Vec<u8>,
    reads: usize,
}

impl BlockRead for SimulatedDongle {
    fn read_block(&mut self, offset: u16, buf: &mut [u8]) -> mtkeepmgr_usb::Result<usize> {
        self.reads += 1;
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.data[(offset as usize + i) % self.data.len()];
        }
        Ok(buf.len())
    }
}

/// Calibration area of `blocks` blocks whose first block never reappears
fn calibration_area(blocks: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), blocks * READ_BLOCK_SZ).prop_map(|mut data| {
        // Tag byte 0 of every block with its index so no later block equals block 0
        for (i, block) in data.chunks_mut(READ_BLOCK_SZ).enumerate() {
            block[0] = (i % 255) as u8;
            block[1] = (i / 255) as u8;
        }
        data
    })
}

proptest! {
    #[test]
    fn probe_finds_period(data in (1usize..=127).prop_flat_map(calibration_area)) {
        let len = data.len();
        let mut dev = SimulatedDongle { data, reads: 0 };
        let mut image = EepromImage::new();

        let adj = probe_image(&mut dev, &mut image).unwrap();
        prop_assert_eq!(adj, None);
        prop_assert_eq!(image.len(), len);
        prop_assert_eq!(dev.reads, len / READ_BLOCK_SZ + 1);
        prop_assert_eq!(image.as_bytes(), &dev.data[..]);
    }

    #[test]
    fn probe_stops_at_capacity(data in (128usize..=200).prop_flat_map(calibration_area)) {
        let mut dev = SimulatedDongle { data, reads: 0 };
        let mut image = EepromImage::new();

        let adj = probe_image(&mut dev, &mut image).unwrap();
        prop_assert_eq!(adj, Some(SizeAdjustment::ProbeExhausted { limit: image.capacity() }));
        prop_assert_eq!(image.len(), image.capacity());
        prop_assert_eq!(dev.reads, image.capacity() / READ_BLOCK_SZ);
    }
}
