/// Finite-difference gradients of scalar volumes
use crate::error::{VolumeError, VolumeResult};
use constants::tensor::MIN_AXIS_LEN;
use ndarray::{Array3, ArrayView1, ArrayView3, ArrayViewMut1, Axis, Zip};

/// Gradient components of a volume, one array per axis in (z, y, x) order.
#[derive(Debug, Clone)]
pub struct Gradient {
    pub dz: Array3<f64>,
    pub dy: Array3<f64>,
    pub dx: Array3<f64>,
}

/// Check that every axis has enough samples for a gradient.
pub fn validate_shape(volume: &ArrayView3<f64>) -> VolumeResult<()> {
    for (axis, &len) in volume.shape().iter().enumerate() {
        if len < MIN_AXIS_LEN {
            return Err(VolumeError::Shape {
                axis,
                len,
                min: MIN_AXIS_LEN,
            });
        }
    }
    Ok(())
}

/// Gradient along all three axes with unit voxel spacing.
pub fn gradient3d(volume: &ArrayView3<f64>) -> VolumeResult<Gradient> {
    validate_shape(volume)?;

    Ok(Gradient {
        dz: gradient_along(volume, Axis(0)),
        dy: gradient_along(volume, Axis(1)),
        dx: gradient_along(volume, Axis(2)),
    })
}

/// Derivative along a single axis.
/// Interior samples use central differences, the two end samples use
/// second-order one-sided stencils (first-order when only two samples exist).
/// NumPy's `gradient(edge_order=2)` rejects two-sample axes instead.
pub fn gradient_along(volume: &ArrayView3<f64>, axis: Axis) -> Array3<f64> {
    let mut out = Array3::<f64>::zeros(volume.raw_dim());

    Zip::from(volume.lanes(axis))
        .and(out.lanes_mut(axis))
        .for_each(|lane, lane_out| difference_lane(lane, lane_out));

    out
}

fn difference_lane(f: ArrayView1<f64>, mut out: ArrayViewMut1<f64>) {
    let n = f.len();
    match n {
        0 | 1 => {}
        2 => {
            let slope = f[1] - f[0];
            out[0] = slope;
            out[1] = slope;
        }
        _ => {
            out[0] = (-3.0 * f[0] + 4.0 * f[1] - f[2]) / 2.0;
            for i in 1..n - 1 {
                out[i] = (f[i + 1] - f[i - 1]) / 2.0;
            }
            out[n - 1] = (3.0 * f[n - 1] - 4.0 * f[n - 2] + f[n - 3]) / 2.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_is_exact_at_boundaries() {
        // f(x) = x^2, derivative 2x; second-order stencils are exact for quadratics.
        let volume = Array3::from_shape_fn((2, 2, 6), |(_, _, x)| (x * x) as f64);
        let dx = gradient_along(&volume.view(), Axis(2));
        for x in 0..6 {
            assert!((dx[[1, 1, x]] - 2.0 * x as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn two_samples_use_plain_difference() {
        let volume = Array3::from_shape_fn((2, 3, 3), |(z, _, _)| if z == 0 { 1.0 } else { 4.0 });
        let grad = gradient3d(&volume.view()).unwrap();
        assert!(grad.dz.iter().all(|&v| v == 3.0));
        assert!(grad.dy.iter().all(|&v| v == 0.0));
        assert!(grad.dx.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn single_sample_axis_is_rejected() {
        let volume = Array3::<f64>::zeros((4, 1, 4));
        match gradient3d(&volume.view()) {
            Err(VolumeError::Shape { axis, len, .. }) => {
                assert_eq!(axis, 1);
                assert_eq!(len, 1);
            }
            other => panic!("expected shape error, got {:?}", other.err()),
        }
    }
}
