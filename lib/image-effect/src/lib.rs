pub mod base_effect;
pub mod blur_effect;
pub mod preset;
pub mod stylized_effect;

use image::GrayImage;

pub use preset::PreprocessPreset;

pub type ImageEffectResult<T> = Result<T, ImageEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum ImageEffectError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Unknown preset level: {0}")]
    UnknownPreset(u8),
}

pub trait Effect {
    fn apply(&self, image: &mut GrayImage) -> ImageEffectResult<()>;
}

#[derive(Debug, Clone)]
pub enum ImageEffect {
    Contrast(base_effect::ContrastConfig),
    GaussianBlur(blur_effect::GaussianBlurConfig),
    Sharpen(stylized_effect::SharpenConfig),
}

impl Effect for ImageEffect {
    fn apply(&self, image: &mut GrayImage) -> ImageEffectResult<()> {
        match self {
            ImageEffect::Contrast(config) => config.apply(image),
            ImageEffect::GaussianBlur(config) => config.apply(image),
            ImageEffect::Sharpen(config) => config.apply(image),
        }
    }
}

/// Runs `effects` in order on `image`, stopping at the first failure.
pub fn apply_all(effects: &[ImageEffect], image: &mut GrayImage) -> ImageEffectResult<()> {
    for effect in effects {
        effect.apply(image)?;
    }

    Ok(())
}
