//! Calibration data size detection
//!
//! The USB read request does not report how large the calibration area is.
//! Reading past its end wraps around to the start, so the reader fetches
//! fixed-size blocks and stops at the first block that equals block zero.
//! The offset of that block is taken as the image length.
//!
//! This is a heuristic: an image whose first block happens to repeat
//! earlier (for example a mostly erased EEPROM) is reported shorter than it
//! really is.

use crate::error::{Result, UsbError};
use crate::protocol::READ_BLOCK_SZ;
use log::{info, trace, warn};
use mtkeepmgr_core::image::{EepromImage, SizeAdjustment};

/// Something that can read calibration data in blocks
pub trait BlockRead {
    /// Read `buf.len()` bytes starting at `offset`
    ///
    /// Returns the number of bytes transferred.
    fn read_block(&mut self, offset: u16, buf: &mut [u8]) -> Result<usize>;
}

impl<T: BlockRead + ?Sized> BlockRead for &mut T {
    fn read_block(&mut self, offset: u16, buf: &mut [u8]) -> Result<usize> {
        (**self).read_block(offset, buf)
    }
}

/// Fill `image` from `dev` and set its length to the detected size
///
/// Returns [`SizeAdjustment::ProbeExhausted`] when the buffer filled up
/// without a wrap-around. Any failed or short block read aborts the probe.
pub fn probe_image<D: BlockRead + ?Sized>(
    dev: &mut D,
    image: &mut EepromImage,
) -> Result<Option<SizeAdjustment>> {
    let capacity = image.capacity();
    let buf = image.buffer_mut();
    let mut off = 0;
    let mut wrapped = false;

    while off + READ_BLOCK_SZ <= capacity {
        let offset = u16::try_from(off).map_err(|_| UsbError::TransferFailed {
            offset: u16::MAX,
            message: format!("offset 0x{:x} out of range", off),
        })?;
        let got = dev.read_block(offset, &mut buf[off..off + READ_BLOCK_SZ])?;
        trace!("EEPROM block 0x{:04x}: {} bytes", off, got);
        if got != READ_BLOCK_SZ {
            return Err(UsbError::ShortRead {
                expected: READ_BLOCK_SZ,
                got,
            });
        }

        if off > 0 && buf[..READ_BLOCK_SZ] == buf[off..off + READ_BLOCK_SZ] {
            info!("EEPROM overlap detected at 0x{:04x}", off);
            wrapped = true;
            break;
        }
        off += READ_BLOCK_SZ;
    }

    image.set_len(off);

    if wrapped {
        Ok(None)
    } else {
        let adjustment = SizeAdjustment::ProbeExhausted { limit: off };
        warn!("{}", adjustment);
        Ok(Some(adjustment))
    }
}
