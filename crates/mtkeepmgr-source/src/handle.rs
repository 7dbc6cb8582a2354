//! SourceHandle - an opened image source with guaranteed release

use mtkeepmgr_core::connector::{AcquireState, Connector};
use mtkeepmgr_core::image::EepromImage;
use mtkeepmgr_core::Result;

/// Owns a connector for the duration of one run
///
/// The connector is released when the handle goes out of scope, whether
/// acquisition succeeded, failed half way, or never started.
pub struct SourceHandle {
    connector: Box<dyn Connector>,
}

impl SourceHandle {
    /// Wrap a connector
    pub fn new(connector: Box<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Name of the underlying connector
    pub fn name(&self) -> &'static str {
        self.connector.name()
    }

    /// Acquisition state of the underlying connector
    pub fn state(&self) -> AcquireState {
        self.connector.state()
    }

    /// Fill `image` from the source
    pub fn acquire_into(&mut self, image: &mut EepromImage) -> Result<()> {
        log::debug!("Acquiring image from {} source", self.connector.name());
        self.connector.acquire(image)?;
        log::debug!("Acquired {} bytes", image.len());
        Ok(())
    }

    /// Acquire into a fresh image
    pub fn acquire(&mut self) -> Result<EepromImage> {
        let mut image = EepromImage::new();
        self.acquire_into(&mut image)?;
        Ok(image)
    }
}

impl Drop for SourceHandle {
    fn drop(&mut self) {
        self.connector.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Recorder {
        released: Rc<Cell<u32>>,
        fail: bool,
        state: AcquireState,
    }

    impl Connector for Recorder {
        fn name(&self) -> &'static str {
            "Recorder"
        }

        fn acquire(&mut self, image: &mut EepromImage) -> Result<()> {
            if self.fail {
                self.state = AcquireState::Failed;
                return Err(mtkeepmgr_core::Error::Transfer("simulated".into()));
            }
            image.buffer_mut()[..2].copy_from_slice(&0x7601u16.to_le_bytes());
            image.set_len(2);
            self.state = AcquireState::Acquired;
            Ok(())
        }

        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }

        fn state(&self) -> AcquireState {
            self.state
        }
    }

    fn handle(fail: bool) -> (SourceHandle, Rc<Cell<u32>>) {
        let released = Rc::new(Cell::new(0));
        let conn = Recorder {
            released: released.clone(),
            fail,
            state: AcquireState::Unacquired,
        };
        (SourceHandle::new(Box::new(conn)), released)
    }

    #[test]
    fn test_release_on_success() {
        let (mut h, released) = handle(false);
        let image = h.acquire().unwrap();
        assert_eq!(image.chip_id(), 0x7601);
        assert_eq!(h.state(), AcquireState::Acquired);
        assert_eq!(released.get(), 0);
        drop(h);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_release_on_failure() {
        let (mut h, released) = handle(true);
        assert!(h.acquire().is_err());
        assert_eq!(h.state(), AcquireState::Failed);
        drop(h);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_release_without_acquire() {
        let (h, released) = handle(false);
        assert_eq!(h.name(), "Recorder");
        drop(h);
        assert_eq!(released.get(), 1);
    }
}
