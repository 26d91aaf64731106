use std::path::Path;

use crate::model::{Coords, Image, PixelBuffer};
use image::DynamicImage;

use super::Result;
use super::util::source_metadata;

pub(crate) fn read_common_raster(path: &Path) -> Result<Image> {
    let decoded = image::open(path)?;
    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    let pixels = match decoded {
        DynamicImage::ImageLuma8(buffer) => PixelBuffer::Gray8(buffer.into_raw()),
        DynamicImage::ImageLuma16(buffer) => PixelBuffer::Gray16(buffer.into_raw()),
        DynamicImage::ImageRgb8(buffer) => PixelBuffer::Rgb8(buffer.into_raw()),
        other => PixelBuffer::Rgb8(other.to_rgb8().into_raw()),
    };
    Ok(Image::new(
        Coords::default(),
        width,
        height,
        pixels,
        source_metadata(path, 0),
    )?)
}
