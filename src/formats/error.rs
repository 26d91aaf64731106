use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IoError>;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("cannot import `{0}` files")]
    UnsupportedFormat(String),

    #[error("TIFF page {page}: {reason}")]
    UnsupportedPage { page: usize, reason: String },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("raster decode failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("TIFF failure: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("decoded plane is not a valid image: {0}")]
    Core(#[from] CoreError),
}
