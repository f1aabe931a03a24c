use crate::FieldResult;
use image::{GrayImage, ImageFormat};
use std::io::Cursor;

/// Re-encodes a grayscale image as PNG bytes.
pub fn encode_png(image: &GrayImage) -> FieldResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn decode_png(bytes: &[u8]) -> FieldResult<GrayImage> {
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_luma8())
}
