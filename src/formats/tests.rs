use image::{ImageBuffer, Luma, Rgb};
use tempfile::tempdir;

use super::{IoError, PageWriter, read_images, write_single_page};
use crate::model::{Coords, Image, ImageMetadata, PixelBuffer, PixelFormat};

fn gray16(time: usize, values: Vec<u16>) -> Image {
    Image::new(
        Coords::builder().time(time).build(),
        2,
        2,
        PixelBuffer::Gray16(values),
        ImageMetadata::new(),
    )
    .expect("image")
}

#[test]
fn tiff_stack_pages_follow_stack_axis() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("stack.tif");
    let mut writer = PageWriter::create(&path).expect("writer");
    assert_eq!(writer.append(&gray16(0, vec![1, 2, 3, 4])).expect("page 0"), 0);
    assert_eq!(writer.append(&gray16(1, vec![5, 6, 7, 8])).expect("page 1"), 1);
    drop(writer);

    let images = read_images(&path, "z").expect("read stack");
    assert_eq!(images.len(), 2);
    assert_eq!(images[1].coords(), &Coords::builder().z(1).build());
    assert_eq!(images[1].pixels(), &PixelBuffer::Gray16(vec![5, 6, 7, 8]));
    assert_eq!(
        images[0].metadata().get("page"),
        Some(&serde_json::json!(0))
    );
}

#[test]
fn single_page_float_tiff_keeps_format() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("float.tiff");
    let image = Image::new(
        Coords::default(),
        2,
        1,
        PixelBuffer::Gray32Float(vec![0.5, 1.5]),
        ImageMetadata::new(),
    )
    .expect("image");
    write_single_page(&path, &image).expect("write");
    let restored = read_images(&path, "time").expect("read");
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].pixel_format(), PixelFormat::Gray32Float);
    assert_eq!(restored[0].coords().index("time"), Some(0));
}

#[test]
fn png_decodes_gray_and_color() {
    let dir = tempdir().expect("tempdir");
    let gray_path = dir.path().join("gray.png");
    let color_path = dir.path().join("color.png");
    ImageBuffer::<Luma<u8>, Vec<u8>>::from_vec(2, 2, vec![0, 50, 100, 255])
        .expect("gray")
        .save(&gray_path)
        .expect("save gray");
    let mut color = ImageBuffer::<Rgb<u8>, Vec<u8>>::new(2, 1);
    color.put_pixel(0, 0, Rgb([255, 0, 0]));
    color.save(&color_path).expect("save color");

    let gray = read_images(&gray_path, "time").expect("read gray");
    let color = read_images(&color_path, "time").expect("read color");
    assert_eq!(gray[0].pixels(), &PixelBuffer::Gray8(vec![0, 50, 100, 255]));
    assert_eq!(color[0].pixel_format(), PixelFormat::Rgb8);
    assert_eq!(color[0].num_components(), 3);
}

#[test]
fn unknown_extension_is_rejected() {
    let error = read_images("data.bmpx", "time").expect_err("must fail");
    assert!(matches!(error, IoError::UnsupportedFormat(ext) if ext == "bmpx"));
}
