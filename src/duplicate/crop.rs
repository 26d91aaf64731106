use std::fmt;

use ndarray::{ArrayView2, s};
use serde::{Deserialize, Serialize};

use crate::model::{Coords, Image, PixelBuffer};

use super::{DuplicateError, Result};

/// A pixel-space region applied to every copied image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "shape")]
pub enum Roi {
    Rect {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
    Polygon {
        points: Vec<(i64, i64)>,
    },
}

impl Roi {
    /// Bounding rectangle; polygons span `[min, max)` of their vertices.
    pub fn bounds(&self) -> Region {
        match self {
            Self::Rect {
                x,
                y,
                width,
                height,
            } => Region {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
            },
            Self::Polygon { points } => {
                let min_x = points.iter().map(|p| p.0).min().unwrap_or(0);
                let max_x = points.iter().map(|p| p.0).max().unwrap_or(0);
                let min_y = points.iter().map(|p| p.1).min().unwrap_or(0);
                let max_y = points.iter().map(|p| p.1).max().unwrap_or(0);
                Region {
                    x: min_x,
                    y: min_y,
                    width: max_x.abs_diff(min_x) as usize,
                    height: max_y.abs_diff(min_y) as usize,
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Self::Polygon { points } = self {
            if points.len() < 3 {
                return Err(DuplicateError::InvalidRoi(format!(
                    "polygon needs at least 3 points, found {}",
                    points.len()
                )));
            }
        }
        let bounds = self.bounds();
        if bounds.width == 0 || bounds.height == 0 {
            return Err(DuplicateError::InvalidRoi(format!("{bounds} has no area")));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub width: usize,
    pub height: usize,
}

impl Region {
    /// Intersection with a `width` x `height` image, as index ranges.
    fn clip(&self, width: usize, height: usize) -> Option<(usize, usize, usize, usize)> {
        let x0 = self.x.max(0) as usize;
        let y0 = self.y.max(0) as usize;
        let x1 = (self.x.saturating_add(self.width as i64)).clamp(0, width as i64) as usize;
        let y1 = (self.y.saturating_add(self.height as i64)).clamp(0, height as i64) as usize;
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}x{}+{}+{}",
            self.width, self.height, self.x, self.y
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct PixelCropper {
    roi: Option<Roi>,
}

impl PixelCropper {
    pub fn new(roi: Option<Roi>) -> Self {
        Self { roi }
    }

    /// Produces the image to store at `coords`. Without a region this is a
    /// shallow re-address of `image`.
    pub fn crop(&self, image: &Image, coords: Coords) -> Result<Image> {
        let Some(roi) = &self.roi else {
            return Ok(image.copy_at_coords(coords));
        };
        let format = image.pixel_format();
        if !format.is_croppable() {
            return Err(DuplicateError::UnsupportedPixelFormat(format));
        }
        let bounds = roi.bounds();
        let (x0, y0, x1, y1) =
            bounds
                .clip(image.width(), image.height())
                .ok_or_else(|| DuplicateError::EmptyCropRegion {
                    region: bounds.to_string(),
                    width: image.width(),
                    height: image.height(),
                })?;
        let window = (x0, y0, x1, y1);
        let pixels = match image.pixels() {
            PixelBuffer::Gray8(values) => {
                PixelBuffer::Gray8(cut(values, image.width(), image.height(), window)?)
            }
            PixelBuffer::Gray16(values) => {
                PixelBuffer::Gray16(cut(values, image.width(), image.height(), window)?)
            }
            PixelBuffer::Gray32Float(_) | PixelBuffer::Rgb8(_) => {
                return Err(DuplicateError::UnsupportedPixelFormat(format));
            }
        };
        Ok(Image::new(
            coords,
            x1 - x0,
            y1 - y0,
            pixels,
            image.metadata().clone(),
        )?)
    }
}

fn cut<T: Copy>(
    values: &[T],
    width: usize,
    height: usize,
    (x0, y0, x1, y1): (usize, usize, usize, usize),
) -> Result<Vec<T>> {
    let plane = ArrayView2::from_shape((height, width), values)?;
    Ok(plane.slice(s![y0..y1, x0..x1]).iter().copied().collect())
}
