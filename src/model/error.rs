use thiserror::Error;

use super::PixelFormat;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(
        "pixel buffer size mismatch: {width}x{height} {format:?} needs {expected} samples, found {actual}"
    )]
    PixelCountMismatch {
        width: usize,
        height: usize,
        format: PixelFormat,
        expected: usize,
        actual: usize,
    },

    #[error("invalid image size {width}x{height}")]
    ZeroSizedImage { width: usize, height: usize },

    #[error("invalid coordinate: axis `{axis}` index {index} lies below range minimum {min}")]
    InvalidCoordinate {
        axis: String,
        index: usize,
        min: usize,
    },
}
