//! Decoding of uploaded image files into 8-bit grayscale.

use crate::{FieldError, FieldResult};
use image::{DynamicImage, GrayImage, ImageReader};
use image_effect::base_effect::GrayscaleConfig;
use std::{io::Cursor, path::Path};

/// Decodes JPEG/PNG bytes, guessing the format from the content.
pub fn load_from_memory(bytes: &[u8]) -> FieldResult<GrayImage> {
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;

    to_gray(image)
}

pub fn load_from_path(path: impl AsRef<Path>) -> FieldResult<GrayImage> {
    let path = path.as_ref();
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;

    log::debug!("decoded {}", path.display());
    to_gray(image)
}

fn to_gray(image: DynamicImage) -> FieldResult<GrayImage> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(FieldError::EmptyImage { width, height });
    }

    log::debug!("converting {:?} {}x{} to grayscale", image.color(), width, height);
    Ok(GrayscaleConfig::new().convert(&image))
}
