use crate::{FRAME_COUNT, FieldResult, ImageField, SLICE_COUNT};
use ndarray::{Array2, Array3, ArrayView2, Axis, stack};

/// Replicates the field along a new trailing axis: shape `(H, W, SLICE_COUNT)`.
/// Every slice is identical to the source field.
pub fn pseudo_volume(field: &ImageField) -> FieldResult<Array3<f32>> {
    let views = vec![field.data().view(); SLICE_COUNT];
    Ok(stack(Axis(2), &views)?)
}

/// Stacks linearly brightened copies on a new leading axis: shape
/// `(FRAME_COUNT, H, W)`, frame `i` = field * (i + 1) / FRAME_COUNT.
pub fn pseudo_time_series(field: &ImageField) -> FieldResult<Array3<f32>> {
    let frames: Vec<Array2<f32>> = (0..FRAME_COUNT)
        .map(|i| {
            let step = (i + 1) as f32;
            field.data().mapv(|v| v * step / FRAME_COUNT as f32)
        })
        .collect();
    let views: Vec<ArrayView2<f32>> = frames.iter().map(|f| f.view()).collect();

    Ok(stack(Axis(0), &views)?)
}
