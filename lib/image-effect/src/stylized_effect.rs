use crate::{Effect, ImageEffectError, ImageEffectResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::GrayImage;

/// Sharpen effect configuration (manual convolution implementation)
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SharpenConfig {
    #[derivative(Default(value = "1.0"))]
    amount: f32,
}

impl SharpenConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for SharpenConfig {
    fn apply(&self, image: &mut GrayImage) -> ImageEffectResult<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ImageEffectError::InvalidParameter(format!(
                "sharpen amount must be non-negative, got {}",
                self.amount
            )));
        }

        // Border pixels are left untouched
        if image.width() < 3 || image.height() < 3 {
            return Ok(());
        }

        let mut result = image.clone();

        let kernel: [f32; 9] = [
            0.0, -self.amount, 0.0,
            -self.amount, 1.0 + 4.0 * self.amount, -self.amount,
            0.0, -self.amount, 0.0,
        ];

        for y in 1..image.height() - 1 {
            for x in 1..image.width() - 1 {
                let mut sum = 0.0;

                for ky in -1i32..=1 {
                    for kx in -1i32..=1 {
                        let px = (x as i32 + kx) as u32;
                        let py = (y as i32 + ky) as u32;

                        let ki = ((ky + 1) * 3 + (kx + 1)) as usize;
                        sum += image.get_pixel(px, py)[0] as f32 * kernel[ki];
                    }
                }

                result.get_pixel_mut(x, y)[0] = sum.round().clamp(0.0, 255.0) as u8;
            }
        }

        *image = result;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_flat_image_unchanged() {
        let mut gray = GrayImage::from_pixel(5, 5, Luma([77]));
        SharpenConfig::new().apply(&mut gray).unwrap();
        assert!(gray.pixels().all(|p| p[0] == 77));
    }

    #[test]
    fn test_peak_is_amplified() {
        let mut gray = GrayImage::from_pixel(3, 3, Luma([100]));
        gray.put_pixel(1, 1, Luma([120]));
        SharpenConfig::new().apply(&mut gray).unwrap();

        // 5 * 120 - 4 * 100
        assert_eq!(gray.get_pixel(1, 1)[0], 200);
        assert_eq!(gray.get_pixel(0, 0)[0], 100);
    }

    #[test]
    fn test_tiny_image_is_noop() {
        let mut gray = GrayImage::from_raw(2, 1, vec![0, 255]).unwrap();
        SharpenConfig::new().apply(&mut gray).unwrap();
        assert_eq!(gray.as_raw(), &vec![0, 255]);
    }
}
