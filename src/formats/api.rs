use std::path::Path;

use crate::model::Image;

use super::raster::read_common_raster;
use super::tiff::read_tiff_stack;
use super::util::extension;
use super::{IoError, Result};

/// Decodes a single image file into planes. TIFF pages are laid out along
/// `stack_axis`; PNG and JPEG files yield one plane at the origin.
pub fn read_images(path: impl AsRef<Path>, stack_axis: &str) -> Result<Vec<Image>> {
    let path = path.as_ref();
    let extension = extension(path)?;
    match extension.as_str() {
        "png" | "jpg" | "jpeg" => Ok(vec![read_common_raster(path)?]),
        "tif" | "tiff" => read_tiff_stack(path, stack_axis),
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}
