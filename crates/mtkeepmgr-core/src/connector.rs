//! Image source abstraction
//!
//! A connector owns whatever handle it needs to reach the calibration data
//! (a file, a USB device) and fills an [`EepromImage`] exactly once.
//!
//! Lifecycle: `Unacquired -> Acquiring -> {Acquired | Failed}`. `release()`
//! is valid from every state and does nothing when nothing is held, so it can
//! be called unconditionally from a scope guard.

use crate::error::Result;
use crate::image::EepromImage;

/// Acquisition state of a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquireState {
    /// Nothing acquired yet (or released)
    #[default]
    Unacquired,
    /// Acquisition in progress
    Acquiring,
    /// Image filled successfully
    Acquired,
    /// Acquisition failed
    Failed,
}

/// A source of EEPROM images
pub trait Connector {
    /// Short human readable source name ("File", "USB")
    fn name(&self) -> &'static str;

    /// Fill `image` from the source
    ///
    /// On error the image contents are unspecified and the connector is in
    /// the [`AcquireState::Failed`] state.
    fn acquire(&mut self, image: &mut EepromImage) -> Result<()>;

    /// Drop any held resources; idempotent
    fn release(&mut self);

    /// Current acquisition state
    fn state(&self) -> AcquireState;
}
