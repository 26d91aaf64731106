use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::model::{Coords, Image, PixelBuffer};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{TiffEncoder, colortype};

use super::util::source_metadata;
use super::{IoError, Result};

pub(crate) fn read_tiff_stack(path: &Path, stack_axis: &str) -> Result<Vec<Image>> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)?;
    let mut images = Vec::new();

    loop {
        let page = images.len();
        let (width, height, pixels) = read_page(&mut decoder, page)?;
        let coords = Coords::builder().index(stack_axis, page).build();
        images.push(Image::new(
            coords,
            width,
            height,
            pixels,
            source_metadata(path, page),
        )?);
        if !decoder.more_images() {
            break;
        }
        decoder.next_image()?;
    }
    Ok(images)
}

/// Decodes the page the decoder currently points at.
pub(crate) fn read_page<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    page: usize,
) -> Result<(usize, usize, PixelBuffer)> {
    let (width, height) = decoder.dimensions()?;
    let (width, height) = (width as usize, height as usize);
    let plane = width * height;
    let pixels = match decoder.read_image()? {
        DecodingResult::U8(buffer) if buffer.len() == plane => PixelBuffer::Gray8(buffer),
        DecodingResult::U8(buffer) if buffer.len() == plane * 3 => PixelBuffer::Rgb8(buffer),
        DecodingResult::U16(buffer) if buffer.len() == plane => PixelBuffer::Gray16(buffer),
        DecodingResult::F32(buffer) if buffer.len() == plane => PixelBuffer::Gray32Float(buffer),
        DecodingResult::U8(_) | DecodingResult::U16(_) | DecodingResult::F32(_) => {
            return Err(IoError::UnsupportedPage {
                page,
                reason: "alpha or multi-sample layout".into(),
            });
        }
        _ => {
            return Err(IoError::UnsupportedPage {
                page,
                reason: "sample type is not u8, u16 or f32".into(),
            });
        }
    };
    Ok((width, height, pixels))
}

fn encode_page<W: Write + Seek>(encoder: &mut TiffEncoder<W>, image: &Image) -> Result<()> {
    let width = image.width() as u32;
    let height = image.height() as u32;
    match image.pixels() {
        PixelBuffer::Gray8(values) => {
            encoder.write_image::<colortype::Gray8>(width, height, values)?;
        }
        PixelBuffer::Gray16(values) => {
            encoder.write_image::<colortype::Gray16>(width, height, values)?;
        }
        PixelBuffer::Gray32Float(values) => {
            encoder.write_image::<colortype::Gray32Float>(width, height, values)?;
        }
        PixelBuffer::Rgb8(values) => {
            encoder.write_image::<colortype::RGB8>(width, height, values)?;
        }
    }
    Ok(())
}

pub(crate) fn write_single_page(path: &Path, image: &Image) -> Result<()> {
    let file = File::create(path)?;
    let mut encoder = TiffEncoder::new(file)?;
    encode_page(&mut encoder, image)
}

/// Appends pages to one growing TIFF stack.
pub(crate) struct PageWriter {
    encoder: TiffEncoder<File>,
    pages: usize,
}

impl std::fmt::Debug for PageWriter {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PageWriter")
            .field("pages", &self.pages)
            .finish()
    }
}

impl PageWriter {
    pub(crate) fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            encoder: TiffEncoder::new(file)?,
            pages: 0,
        })
    }

    /// Returns the page number the image was written to.
    pub(crate) fn append(&mut self, image: &Image) -> Result<usize> {
        encode_page(&mut self.encoder, image)?;
        let page = self.pages;
        self.pages += 1;
        Ok(page)
    }
}
