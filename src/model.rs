mod axis;
mod coords;
mod error;
mod image;
mod metadata;


pub use axis::{CHANNEL, PixelFormat, STAGE_POSITION, SIZE_AXES, TIME, Z, canonical_axis};
pub use coords::{Coords, CoordsBuilder};
pub use error::{CoreError, Result};
pub use image::{Image, ImageMetadata, PixelBuffer};
pub use metadata::SummaryMetadata;
