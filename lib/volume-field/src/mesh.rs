use ndarray::Array2;

/// Pixel coordinate grids of shape `(height, width)`: `x[[r, c]] = c`, `y[[r, c]] = r`.
pub fn mesh_grid(width: usize, height: usize) -> (Array2<f32>, Array2<f32>) {
    let x = Array2::from_shape_fn((height, width), |(_, c)| c as f32);
    let y = Array2::from_shape_fn((height, width), |(r, _)| r as f32);
    (x, y)
}
