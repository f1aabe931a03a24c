use crate::{Effect, ImageEffectError, ImageEffectResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::GrayImage;

/// Gaussian blur configuration (using imageproc)
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GaussianBlurConfig {
    #[derivative(Default(value = "2.0"))]
    sigma: f32,
}

impl GaussianBlurConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for GaussianBlurConfig {
    fn apply(&self, image: &mut GrayImage) -> ImageEffectResult<()> {
        // imageproc asserts on a non-positive sigma
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(ImageEffectError::InvalidParameter(format!(
                "blur sigma must be positive, got {}",
                self.sigma
            )));
        }

        if image.width() == 0 || image.height() == 0 {
            return Ok(());
        }

        *image = imageproc::filter::gaussian_blur_f32(image, self.sigma);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_flat_image_unchanged() {
        let mut gray = GrayImage::from_pixel(16, 16, Luma([90]));
        GaussianBlurConfig::new().apply(&mut gray).unwrap();
        assert!(gray.pixels().all(|p| (p[0] as i32 - 90).abs() <= 1));
    }

    #[test]
    fn test_blur_softens_step() {
        let mut gray = GrayImage::from_fn(16, 4, |x, _| Luma([if x < 8 { 0 } else { 255 }]));
        GaussianBlurConfig::new().apply(&mut gray).unwrap();

        let left = gray.get_pixel(7, 2)[0];
        let right = gray.get_pixel(8, 2)[0];
        assert!(left > 0 && right < 255);
        assert!(left < right);
    }

    #[test]
    fn test_rejects_zero_sigma() {
        let mut gray = GrayImage::new(4, 4);
        let err = GaussianBlurConfig::new().with_sigma(0.0).apply(&mut gray);
        assert!(matches!(err, Err(ImageEffectError::InvalidParameter(_))));
    }
}
