/// Per-voxel structure tensors of 3D scalar volumes
use crate::error::{VolumeError, VolumeResult};
use crate::gradient::{Gradient, gradient3d};
use crate::smoothing::smooth_tensor_field;
use constants::tensor::TENSOR_DIM;
use ndarray::{Array3, Array5, ArrayView3, s};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

/// Dense (Z, Y, X, 3, 3) field of symmetric tensors.
///
/// Holds nine values per input voxel, so a 256^3 volume needs a
/// 256^3 x 9 array; this dominates memory for large inputs.
pub type TensorField = Array5<f64>;

/// Independent tensor entries, in the order noise is drawn for them.
/// Index 0 is the x component, 1 is y, 2 is z.
const INDEPENDENT_ENTRIES: [(usize, usize); 6] = [(0, 0), (1, 1), (2, 2), (0, 1), (0, 2), (1, 2)];

/// Validate smoothing and noise parameters, returning the kernel side.
pub fn validate_parameters(sigma: i64, noise: f64) -> VolumeResult<usize> {
    if sigma < 0 {
        return Err(VolumeError::invalid("sigma", sigma));
    }
    if !noise.is_finite() || noise < 0.0 {
        return Err(VolumeError::invalid("noise", noise));
    }
    usize::try_from(sigma).map_err(|_| VolumeError::invalid("sigma", sigma))
}

/// Structure tensor of `volume` using the thread-local RNG for noise.
///
/// `sigma` is the side of the all-ones smoothing kernel (0 skips smoothing)
/// and `noise` the standard deviation of the rectified noise added to each
/// independent entry (0 skips it).
pub fn structure3d(volume: &ArrayView3<f64>, sigma: i64, noise: f64) -> VolumeResult<TensorField> {
    structure3d_with_rng(volume, sigma, noise, &mut rand::thread_rng())
}

/// Structure tensor of `volume`, drawing noise from `rng`.
pub fn structure3d_with_rng<R: Rng + ?Sized>(
    volume: &ArrayView3<f64>,
    sigma: i64,
    noise: f64,
    rng: &mut R,
) -> VolumeResult<TensorField> {
    let side = validate_parameters(sigma, noise)?;
    let gradient = gradient3d(volume)?;

    let noise_dist = if noise > 0.0 {
        Some(Normal::new(0.0, noise).map_err(|_| VolumeError::invalid("noise", noise))?)
    } else {
        None
    };

    let (nz, ny, nx) = volume.dim();
    let mut field = TensorField::zeros((nz, ny, nx, TENSOR_DIM, TENSOR_DIM));

    for &(i, j) in &INDEPENDENT_ENTRIES {
        let mut entry = component(&gradient, i) * component(&gradient, j);

        if let Some(dist) = &noise_dist {
            entry.mapv_inplace(|v| v + dist.sample(&mut *rng).abs());
        }

        field.slice_mut(s![.., .., .., i, j]).assign(&entry);
        if i != j {
            field.slice_mut(s![.., .., .., j, i]).assign(&entry);
        }
    }

    if side > 0 {
        field = smooth_tensor_field(&field, side);
    }

    debug!(
        "Structure tensor for {:?} (sigma {}, noise {})",
        volume.shape(),
        sigma,
        noise
    );
    Ok(field)
}

fn component(gradient: &Gradient, axis: usize) -> &Array3<f64> {
    match axis {
        0 => &gradient.dx,
        1 => &gradient.dy,
        _ => &gradient.dz,
    }
}

/// Noise-free structure tensor with every voxel that is exactly zero in
/// `volume` cleared afterwards.
pub fn structure3d_masked(volume: &ArrayView3<f64>, sigma: i64) -> VolumeResult<TensorField> {
    let mut field = structure3d(volume, sigma, 0.0)?;

    for ((z, y, x), &value) in volume.indexed_iter() {
        if value == 0.0 {
            field.slice_mut(s![z, y, x, .., ..]).fill(0.0);
        }
    }

    Ok(field)
}
