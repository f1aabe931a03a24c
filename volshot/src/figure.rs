//! Renderer-neutral chart documents.
//!
//! The JSON layout follows the common `data` + `layout` figure convention so a
//! plotting front end can render it without further translation.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use volume_field::{HEIGHT_SCALE, ImageField, mesh_grid};

pub type Grid = Vec<Vec<f32>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Surface {
        x: Grid,
        y: Grid,
        z: Grid,
        colorscale: String,
        opacity: f32,
    },
    Contour {
        z: Grid,
        colorscale: String,
    },
    Scatter3d {
        x: Vec<f32>,
        y: Vec<f32>,
        z: Vec<f32>,
        mode: String,
        line: Line,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub color: String,
    pub width: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zaxis: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f32; 2]>,
}

impl Axis {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            range: None,
        }
    }
}

impl Figure {
    pub fn title(&self) -> &str {
        &self.layout.title
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("{} written to {}", self.title(), path.as_ref().display());
        Ok(())
    }
}

fn to_grid(array: &Array2<f32>) -> Grid {
    array.rows().into_iter().map(|row| row.to_vec()).collect()
}

pub fn surface_figure(field: &ImageField) -> Figure {
    let (x, y) = mesh_grid(field.width(), field.height());

    Figure {
        data: vec![Trace::Surface {
            x: to_grid(&x),
            y: to_grid(&y),
            z: to_grid(&field.surface()),
            colorscale: "Gray".to_string(),
            opacity: 0.9,
        }],
        layout: Layout {
            title: "3D Surface Plot".to_string(),
            scene: Some(Scene {
                xaxis: Some(Axis::titled("X")),
                yaxis: Some(Axis::titled("Y")),
                zaxis: Some(Axis {
                    title: "Intensity".to_string(),
                    range: Some([0.0, HEIGHT_SCALE]),
                }),
            }),
            ..Default::default()
        },
    }
}

pub fn contour_figure(field: &ImageField) -> Figure {
    Figure {
        data: vec![Trace::Contour {
            z: to_grid(&field.surface()),
            colorscale: "Viridis".to_string(),
        }],
        layout: Layout {
            title: "3D Contour Plot".to_string(),
            xaxis: Some(Axis::titled("X")),
            yaxis: Some(Axis::titled("Y")),
            ..Default::default()
        },
    }
}

/// Every pixel becomes a vertex; vertices are joined in row-major order.
pub fn wireframe_figure(field: &ImageField) -> Figure {
    let (x, y) = mesh_grid(field.width(), field.height());

    Figure {
        data: vec![Trace::Scatter3d {
            x: x.iter().copied().collect(),
            y: y.iter().copied().collect(),
            z: field.surface().iter().copied().collect(),
            mode: "lines".to_string(),
            line: Line {
                color: "blue".to_string(),
                width: 2.0,
            },
        }],
        layout: Layout {
            title: "3D Wireframe Plot".to_string(),
            scene: Some(Scene {
                zaxis: Some(Axis::titled("Intensity")),
                ..Default::default()
            }),
            ..Default::default()
        },
    }
}
