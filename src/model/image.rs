use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Coords, CoreError, PixelFormat, Result};

pub type ImageMetadata = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    Gray8(Vec<u8>),
    Gray16(Vec<u16>),
    Gray32Float(Vec<f32>),
    /// Interleaved RGB samples.
    Rgb8(Vec<u8>),
}

impl PixelBuffer {
    pub fn format(&self) -> PixelFormat {
        match self {
            Self::Gray8(_) => PixelFormat::Gray8,
            Self::Gray16(_) => PixelFormat::Gray16,
            Self::Gray32Float(_) => PixelFormat::Gray32Float,
            Self::Rgb8(_) => PixelFormat::Rgb8,
        }
    }

    pub fn sample_count(&self) -> usize {
        match self {
            Self::Gray8(values) | Self::Rgb8(values) => values.len(),
            Self::Gray16(values) => values.len(),
            Self::Gray32Float(values) => values.len(),
        }
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        fn fold(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
            values.fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
        }
        match self {
            Self::Gray8(values) | Self::Rgb8(values) => fold(values.iter().map(|v| f64::from(*v))),
            Self::Gray16(values) => fold(values.iter().map(|v| f64::from(*v))),
            Self::Gray32Float(values) => fold(values.iter().map(|v| f64::from(*v))),
        }
    }
}

/// One plane of an image series.
///
/// The pixel buffer is shared between copies, so re-addressing an image
/// with [`Image::copy_at_coords`] never duplicates pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    coords: Coords,
    width: usize,
    height: usize,
    pixels: Arc<PixelBuffer>,
    metadata: ImageMetadata,
}

impl Image {
    pub fn new(
        coords: Coords,
        width: usize,
        height: usize,
        pixels: PixelBuffer,
        metadata: ImageMetadata,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::ZeroSizedImage { width, height });
        }
        let format = pixels.format();
        let expected = width * height * format.num_components();
        if pixels.sample_count() != expected {
            return Err(CoreError::PixelCountMismatch {
                width,
                height,
                format,
                expected,
                actual: pixels.sample_count(),
            });
        }
        Ok(Self {
            coords,
            width,
            height,
            pixels: Arc::new(pixels),
            metadata,
        })
    }

    pub fn copy_at_coords(&self, coords: Coords) -> Self {
        Self {
            coords,
            ..self.clone()
        }
    }

    pub fn coords(&self) -> &Coords {
        &self.coords
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixels.format()
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.pixel_format().bytes_per_pixel()
    }

    pub fn num_components(&self) -> usize {
        self.pixel_format().num_components()
    }
}
