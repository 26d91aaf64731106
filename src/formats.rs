mod api;
mod error;
mod raster;
mod tiff;
mod util;

#[cfg(test)]
mod tests;

pub use api::read_images;
pub use error::{IoError, Result};
pub(crate) use tiff::{PageWriter, read_page, write_single_page};
