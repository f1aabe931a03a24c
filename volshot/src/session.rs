//! The single image held between interactions.
//!
//! Every visualization is recomputed from the stored image on demand. A failed
//! upload leaves the session empty, and every query on an empty session fails
//! with [`SessionError::NoImageLoaded`].

use crate::{
    figure::{self, Figure},
    scene::{ADJUSTED_VOLUME_TITLE, TIME_SERIES_TITLE, VOLUME_TITLE, VolumeScene},
};
use image::GrayImage;
use image_effect::{ImageEffectError, PreprocessPreset};
use log::{info, warn};
use std::{fs, path::Path};
use volume_field::{FieldError, ImageField, codec, loader, pseudo_time_series, pseudo_volume};

pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No image loaded")]
    NoImageLoaded,
    #[error("Opacity must lie in [0, 1], got {0}")]
    InvalidOpacity(f32),
    #[error("Field Error {0}")]
    Field(#[from] FieldError),
    #[error("Effect Error {0}")]
    Effect(#[from] ImageEffectError),
    #[error("IO Error {0}")]
    IO(#[from] std::io::Error),
    #[error("Json Error {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub name: String,
    /// Grayscale image as decoded, before any preset.
    pub original: GrayImage,
    pub preset: Option<PreprocessPreset>,
    /// Normalized field of the (possibly preprocessed) image.
    pub field: ImageField,
}

#[derive(Debug, Default)]
pub struct Session {
    image: Option<LoadedImage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(
        &mut self,
        name: &str,
        bytes: &[u8],
        preset: Option<PreprocessPreset>,
    ) -> SessionResult<&LoadedImage> {
        self.image = None;

        let loaded = match Self::prepare(name, bytes, preset) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("upload of {name} failed: {e}");
                return Err(e);
            }
        };

        info!(
            "loaded {} ({}x{}, preset {})",
            loaded.name,
            loaded.field.width(),
            loaded.field.height(),
            loaded.preset.map_or("none", |p| p.name())
        );

        Ok(&*self.image.insert(loaded))
    }

    pub fn upload_path(
        &mut self,
        path: impl AsRef<Path>,
        preset: Option<PreprocessPreset>,
    ) -> SessionResult<&LoadedImage> {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.image = None;
                warn!("read {} failed: {e}", path.display());
                return Err(e.into());
            }
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.upload(&name, &bytes, preset)
    }

    fn prepare(
        name: &str,
        bytes: &[u8],
        preset: Option<PreprocessPreset>,
    ) -> SessionResult<LoadedImage> {
        let original = loader::load_from_memory(bytes)?;
        let field = match preset {
            Some(preset) => ImageField::from_gray(&preset.apply(&original)?)?,
            None => ImageField::from_gray(&original)?,
        };

        Ok(LoadedImage {
            name: name.to_string(),
            original,
            preset,
            field,
        })
    }

    pub fn clear(&mut self) {
        self.image = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> SessionResult<&LoadedImage> {
        self.image.as_ref().ok_or(SessionError::NoImageLoaded)
    }

    pub fn surface_figure(&self) -> SessionResult<Figure> {
        Ok(figure::surface_figure(&self.image()?.field))
    }

    pub fn contour_figure(&self) -> SessionResult<Figure> {
        Ok(figure::contour_figure(&self.image()?.field))
    }

    pub fn wireframe_figure(&self) -> SessionResult<Figure> {
        Ok(figure::wireframe_figure(&self.image()?.field))
    }

    pub fn volume_scene(&self, dir: &Path) -> SessionResult<VolumeScene> {
        let volume = pseudo_volume(&self.image()?.field)?;
        VolumeScene::export(VOLUME_TITLE, &volume, None, dir, "volume")
    }

    pub fn adjusted_volume_scene(&self, dir: &Path, opacity: f32) -> SessionResult<VolumeScene> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(SessionError::InvalidOpacity(opacity));
        }

        let volume = pseudo_volume(&self.image()?.field)?;
        VolumeScene::export(
            ADJUSTED_VOLUME_TITLE,
            &volume,
            Some(opacity),
            dir,
            "adjusted_volume",
        )
    }

    pub fn time_series_scene(&self, dir: &Path) -> SessionResult<VolumeScene> {
        let series = pseudo_time_series(&self.image()?.field)?;
        VolumeScene::export(TIME_SERIES_TITLE, &series, None, dir, "time_series")
    }

    /// The decoded grayscale image, before any preset, as PNG bytes.
    pub fn download_png(&self) -> SessionResult<Vec<u8>> {
        Ok(codec::encode_png(&self.image()?.original)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn png() -> Vec<u8> {
        let gray = GrayImage::from_fn(5, 4, |x, y| Luma([(x * 50 + y) as u8]));
        codec::encode_png(&gray).unwrap()
    }

    #[test]
    fn test_empty_session() {
        let session = Session::new();
        assert!(!session.is_loaded());
        assert!(matches!(session.surface_figure(), Err(SessionError::NoImageLoaded)));
        assert!(matches!(session.download_png(), Err(SessionError::NoImageLoaded)));
    }

    #[test]
    fn test_failed_upload_clears_session() {
        let mut session = Session::new();
        session.upload("ok.png", &png(), None).unwrap();
        assert!(session.is_loaded());

        assert!(session.upload("bad.png", b"not an image", None).is_err());
        assert!(!session.is_loaded());
        assert!(matches!(session.contour_figure(), Err(SessionError::NoImageLoaded)));
    }

    #[test]
    fn test_preset_changes_field_not_download() {
        let mut session = Session::new();
        let plain = session.upload("a.png", &png(), None).unwrap().field.clone();
        let download = session.download_png().unwrap();

        let loaded = session
            .upload("a.png", &png(), Some(PreprocessPreset::SharpenContrast))
            .unwrap();
        assert_eq!(loaded.preset, Some(PreprocessPreset::SharpenContrast));
        assert_ne!(loaded.field, plain);
        assert_eq!(session.download_png().unwrap(), download);
    }

    #[test]
    fn test_opacity_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new();
        session.upload("a.png", &png(), None).unwrap();

        for opacity in [-0.1, 1.01, f32::NAN] {
            assert!(matches!(
                session.adjusted_volume_scene(dir.path(), opacity),
                Err(SessionError::InvalidOpacity(_))
            ));
        }

        let scene = session.adjusted_volume_scene(dir.path(), 1.0).unwrap();
        assert_eq!(scene.alpha, Some(1.0));
    }
}
