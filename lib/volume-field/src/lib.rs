//! Normalized intensity fields derived from a single grayscale image.
//!
//! An uploaded picture is decoded, collapsed to one channel and scaled to
//! `[0, 1]`. Everything else in this crate is derived from that field:
//! a height-scaled surface, a stack of identical slices standing in for a
//! volume, and a stack of linearly brightened frames standing in for a
//! time series. None of the derived data is real depth or time information.

pub mod codec;
pub mod field;
pub mod loader;
pub mod mesh;
pub mod raw;
pub mod volume;

pub use field::ImageField;
pub use mesh::mesh_grid;
pub use volume::{pseudo_time_series, pseudo_volume};

/// Height multiplier applied to normalized intensities for surface plots.
pub const HEIGHT_SCALE: f32 = 20.0;

/// Number of identical slices in a pseudo-volume.
pub const SLICE_COUNT: usize = 10;

/// Number of frames in a pseudo-time-series.
pub const FRAME_COUNT: usize = 10;

pub type FieldResult<T> = std::result::Result<T, FieldError>;

#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("IO Error {0}")]
    IO(#[from] std::io::Error),
    #[error("Image Error {0}")]
    Image(#[from] image::ImageError),
    #[error("Shape Error {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}
