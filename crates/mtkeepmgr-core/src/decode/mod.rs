//! Generic decode engine
//!
//! Pure functions over an [`EepromImage`](crate::image::EepromImage). Chip
//! decoders combine these with their static field tables.

mod delta;
mod field;
mod power;
mod tempcomp;

pub use delta::{DeltaFormat, SignedDelta, DELTA_DEFAULT, PWR_DELTA};
pub use field::{field_get, field_pack, Field};
pub use power::{read_channel_powers, ChannelPower, PowerRange};
pub use tempcomp::{clamp_adjust, read_points, TempCompTable};
