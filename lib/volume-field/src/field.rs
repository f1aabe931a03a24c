use crate::{FieldError, FieldResult, HEIGHT_SCALE};
use image::GrayImage;
use ndarray::Array2;

/// Grayscale intensities scaled to `[0, 1]`, indexed as `(row, column)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageField {
    data: Array2<f32>,
}

impl ImageField {
    pub fn from_gray(image: &GrayImage) -> FieldResult<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyImage { width, height });
        }

        let samples = image.as_raw().iter().map(|&v| v as f32 / 255.0).collect();
        let data = Array2::from_shape_vec((height as usize, width as usize), samples)?;

        Ok(Self { data })
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    /// Intensities multiplied by [`HEIGHT_SCALE`], range `[0, 20]`.
    pub fn surface(&self) -> Array2<f32> {
        self.data.mapv(|v| v * HEIGHT_SCALE)
    }
}
