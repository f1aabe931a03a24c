use crate::{
    ImageEffect, ImageEffectError, ImageEffectResult, apply_all, base_effect::ContrastConfig,
    blur_effect::GaussianBlurConfig, stylized_effect::SharpenConfig,
};
use image::GrayImage;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Fixed preprocessing pipelines, selected by level 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum PreprocessPreset {
    Blur = 1,
    BlurContrast,
    SharpenContrast,
}

impl PreprocessPreset {
    pub fn from_level(level: u8) -> ImageEffectResult<Self> {
        Self::try_from(level).map_err(|_| ImageEffectError::UnknownPreset(level))
    }

    pub fn level(&self) -> u8 {
        (*self).into()
    }

    pub fn name(&self) -> &'static str {
        match self {
            PreprocessPreset::Blur => "Blur",
            PreprocessPreset::BlurContrast => "Blur + Contrast",
            PreprocessPreset::SharpenContrast => "Sharpen + Contrast",
        }
    }

    pub fn effects(&self) -> Vec<ImageEffect> {
        match self {
            PreprocessPreset::Blur => vec![ImageEffect::GaussianBlur(
                GaussianBlurConfig::new().with_sigma(2.0),
            )],

            PreprocessPreset::BlurContrast => vec![
                ImageEffect::GaussianBlur(GaussianBlurConfig::new().with_sigma(2.0)),
                ImageEffect::Contrast(ContrastConfig::new().with_factor(1.5)),
            ],

            PreprocessPreset::SharpenContrast => vec![
                ImageEffect::Sharpen(SharpenConfig::new().with_amount(1.0)),
                ImageEffect::Contrast(ContrastConfig::new().with_factor(2.0)),
            ],
        }
    }

    /// Returns a filtered copy; the input is left untouched.
    pub fn apply(&self, image: &GrayImage) -> ImageEffectResult<GrayImage> {
        let mut output = image.clone();
        apply_all(&self.effects(), &mut output)?;

        log::debug!(
            "applied preset {} ({}) to {}x{} image",
            self.level(),
            self.name(),
            image.width(),
            image.height()
        );

        Ok(output)
    }

    pub fn all_presets() -> &'static [PreprocessPreset] {
        &[
            PreprocessPreset::Blur,
            PreprocessPreset::BlurContrast,
            PreprocessPreset::SharpenContrast,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient() -> GrayImage {
        GrayImage::from_fn(24, 16, |x, y| Luma([((x * 11 + y * 5) % 256) as u8]))
    }

    #[test]
    fn test_levels() {
        assert_eq!(PreprocessPreset::from_level(1).unwrap(), PreprocessPreset::Blur);
        assert_eq!(
            PreprocessPreset::from_level(3).unwrap(),
            PreprocessPreset::SharpenContrast
        );

        for preset in PreprocessPreset::all_presets() {
            assert_eq!(PreprocessPreset::from_level(preset.level()).unwrap(), *preset);
        }
    }

    #[test]
    fn test_unknown_levels_rejected() {
        for level in [0u8, 4, 255] {
            assert!(matches!(
                PreprocessPreset::from_level(level),
                Err(ImageEffectError::UnknownPreset(l)) if l == level
            ));
        }
    }

    #[test]
    fn test_presets_are_deterministic() -> anyhow::Result<()> {
        let source = gradient();

        for preset in PreprocessPreset::all_presets() {
            let first = preset.apply(&source)?;
            let second = preset.apply(&source)?;
            assert_eq!(first.as_raw(), second.as_raw());
            assert_eq!(first.dimensions(), source.dimensions());
        }

        Ok(())
    }

    #[test]
    fn test_apply_leaves_input_untouched() -> anyhow::Result<()> {
        let source = gradient();
        let copy = source.clone();
        PreprocessPreset::SharpenContrast.apply(&source)?;
        assert_eq!(source, copy);
        Ok(())
    }

    #[test]
    fn test_pipeline_composition() {
        assert_eq!(PreprocessPreset::Blur.effects().len(), 1);
        assert!(matches!(
            PreprocessPreset::BlurContrast.effects().as_slice(),
            [ImageEffect::GaussianBlur(_), ImageEffect::Contrast(_)]
        ));
        assert!(matches!(
            PreprocessPreset::SharpenContrast.effects().as_slice(),
            [ImageEffect::Sharpen(_), ImageEffect::Contrast(_)]
        ));
    }
}
