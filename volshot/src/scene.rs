use crate::SessionResult;
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use volume_field::raw;

pub const VOLUME_TITLE: &str = "Rotate the volume";
pub const ADJUSTED_VOLUME_TITLE: &str = "Adjustable Volume";
pub const TIME_SERIES_TITLE: &str = "4D Volume (Time Series)";

/// Header describing a raw voxel file for an external volume viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeScene {
    pub title: String,
    pub dims: [usize; 3],
    pub spacing: [f32; 3],
    pub cmap: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,

    pub interactive: bool,
    pub dtype: String,
    pub data_file: PathBuf,

    #[serde(skip)]
    pub header_file: PathBuf,
}

impl VolumeScene {
    /// Writes `<stem>.raw` and `<stem>.json` into `dir`.
    pub fn export(
        title: &str,
        volume: &Array3<f32>,
        alpha: Option<f32>,
        dir: &Path,
        stem: &str,
    ) -> SessionResult<Self> {
        fs::create_dir_all(dir)?;

        let data_file = dir.join(format!("{stem}.raw"));
        let header_file = dir.join(format!("{stem}.json"));
        raw::save_f32_le(volume, &data_file)?;

        let (d0, d1, d2) = volume.dim();
        let scene = Self {
            title: title.to_string(),
            dims: [d0, d1, d2],
            spacing: [1.0, 1.0, 1.0],
            cmap: "bone".to_string(),
            alpha,
            interactive: true,
            dtype: "float32le".to_string(),
            data_file,
            header_file,
        };

        fs::write(&scene.header_file, serde_json::to_string_pretty(&scene)?)?;
        log::info!("{} written to {}", scene.title, scene.header_file.display());

        Ok(scene)
    }

    pub fn load(header_file: impl AsRef<Path>) -> SessionResult<Self> {
        let text = fs::read_to_string(header_file.as_ref())?;
        let mut scene: Self = serde_json::from_str(&text)?;
        scene.header_file = header_file.as_ref().to_path_buf();
        Ok(scene)
    }

    pub fn voxel_count(&self) -> usize {
        self.dims.iter().product()
    }
}
