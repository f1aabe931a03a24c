use crate::{Effect, ImageEffectError, ImageEffectResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::{DynamicImage, GrayImage, Luma};

/// Grayscale conversion configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GrayscaleConfig {
    #[derivative(Default(value = "GrayscaleMode::Luminance"))]
    mode: GrayscaleMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayscaleMode {
    Average,
    Luminance,
}

impl GrayscaleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapses a decoded image to a single 8-bit channel. Alpha is dropped.
    pub fn convert(&self, image: &DynamicImage) -> GrayImage {
        match image {
            DynamicImage::ImageLuma8(gray) => gray.clone(),
            DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageLumaA16(_) => image.to_luma8(),
            _ => {
                let rgba = image.to_rgba8();
                let mut gray = GrayImage::new(rgba.width(), rgba.height());

                for (dst, src) in gray.pixels_mut().zip(rgba.pixels()) {
                    let (r, g, b) = (src[0] as u32, src[1] as u32, src[2] as u32);
                    let value = match self.mode {
                        GrayscaleMode::Average => (r + g + b) / 3,
                        // 0.299*R + 0.587*G + 0.114*B in 16.16 fixed point, rounded
                        GrayscaleMode::Luminance => {
                            (19595 * r + 38470 * g + 7471 * b + 0x8000) >> 16
                        }
                    };
                    *dst = Luma([value as u8]);
                }

                gray
            }
        }
    }
}

/// Contrast adjustment configuration
///
/// Pixels are pushed away from (factor > 1) or pulled towards (factor < 1)
/// the rounded mean intensity of the whole image. A factor of 1.0 is the identity.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ContrastConfig {
    #[derivative(Default(value = "1.0"))]
    factor: f32,
}

impl ContrastConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn mean_intensity(image: &GrayImage) -> f32 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0.0;
    }

    let sum: u64 = image.pixels().map(|p| p[0] as u64).sum();
    (sum as f64 / count as f64) as f32
}

impl Effect for ContrastConfig {
    fn apply(&self, image: &mut GrayImage) -> ImageEffectResult<()> {
        if !self.factor.is_finite() || self.factor < 0.0 {
            return Err(ImageEffectError::InvalidParameter(format!(
                "contrast factor must be a finite non-negative number, got {}",
                self.factor
            )));
        }

        let pivot = (mean_intensity(image) + 0.5).floor();

        for pixel in image.pixels_mut() {
            let val = pixel[0] as f32;
            let new_val = pivot + self.factor * (val - pivot);
            pixel[0] = new_val.round().clamp(0.0, 255.0) as u8;
        }

        Ok(())
    }
}
