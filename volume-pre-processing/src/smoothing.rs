/// Box-kernel smoothing of tensor field channels
use constants::tensor::TENSOR_DIM;
use ndarray::{Array3, Array5, ArrayView1, ArrayView3, ArrayViewMut1, Axis, Zip, s};
use rayon::prelude::*;
use tracing::debug;

/// Sum every voxel's cubic neighbourhood of side `side`, cropped to the input shape.
///
/// The kernel is all ones and is not normalised, so a uniform region is
/// scaled by up to `side^3`. Along each axis output `i` covers inputs
/// `i - side/2 ..= i + (side-1)/2`; samples outside the volume count as zero.
/// A side of 0 or 1 returns the input unchanged.
pub fn box_sum3d(channel: &ArrayView3<f64>, side: usize) -> Array3<f64> {
    let mut current = channel.to_owned();
    if side <= 1 {
        return current;
    }

    for axis in 0..3 {
        let mut next = Array3::<f64>::zeros(current.raw_dim());
        Zip::from(current.lanes(Axis(axis)))
            .and(next.lanes_mut(Axis(axis)))
            .for_each(|lane, lane_out| window_sum_lane(lane, lane_out, side));
        current = next;
    }

    current
}

fn window_sum_lane(input: ArrayView1<f64>, mut out: ArrayViewMut1<f64>, side: usize) {
    let n = input.len();
    let before = side / 2;
    let after = (side - 1) / 2;

    for i in 0..n {
        let lo = i.saturating_sub(before);
        let hi = (i + after).min(n - 1);
        out[i] = input.slice(s![lo..=hi]).sum();
    }
}

/// Smooth each of the nine trailing channels of a (Z, Y, X, 3, 3) field independently.
pub fn smooth_tensor_field(field: &Array5<f64>, side: usize) -> Array5<f64> {
    debug!("Box smoothing {:?} with kernel side {}", field.shape(), side);

    let channels: Vec<((usize, usize), Array3<f64>)> = (0..TENSOR_DIM * TENSOR_DIM)
        .into_par_iter()
        .map(|c| {
            let (i, j) = (c / TENSOR_DIM, c % TENSOR_DIM);
            let view = field.slice(s![.., .., .., i, j]);
            ((i, j), box_sum3d(&view, side))
        })
        .collect();

    let mut smoothed = Array5::<f64>::zeros(field.raw_dim());
    for ((i, j), channel) in channels {
        smoothed.slice_mut(s![.., .., .., i, j]).assign(&channel);
    }
    smoothed
}
