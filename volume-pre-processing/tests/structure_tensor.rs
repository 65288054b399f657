use ndarray::{Array3, s};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand::rngs::StdRng;
use volume_pre_processing::{
    VolumeError, structure3d, structure3d_masked, structure3d_with_rng, to_rgb,
};

fn random_volume(shape: (usize, usize, usize), seed: u64) -> Array3<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Uniform::new(0.0, 1.0);
    Array3::from_shape_fn(shape, |_| dist.sample(&mut rng))
}

#[test]
fn unsmoothed_field_is_symmetric() {
    let volume = random_volume((6, 7, 8), 11);
    let field = structure3d(&volume.view(), 0, 0.0).unwrap();

    for z in 0..6 {
        for y in 0..7 {
            for x in 0..8 {
                for i in 0..3 {
                    for j in 0..3 {
                        assert_eq!(field[[z, y, x, i, j]], field[[z, y, x, j, i]]);
                    }
                }
            }
        }
    }
}

#[test]
fn smoothing_preserves_shape_and_symmetry() {
    let volume = random_volume((5, 6, 7), 12);
    let plain = structure3d(&volume.view(), 0, 0.0).unwrap();

    for sigma in [1, 2, 3, 4] {
        let smoothed = structure3d(&volume.view(), sigma, 0.0).unwrap();
        assert_eq!(smoothed.shape(), plain.shape());
        assert_eq!(smoothed.shape(), &[5, 6, 7, 3, 3]);
        for (a, b) in [(0, 1), (0, 2), (1, 2)] {
            let upper = smoothed.slice(s![.., .., .., a, b]);
            let lower = smoothed.slice(s![.., .., .., b, a]);
            assert!(upper.iter().zip(lower.iter()).all(|(u, l)| (u - l).abs() < 1e-12));
        }
    }
}

#[test]
fn constant_volume_has_zero_field() {
    let volume = Array3::from_elem((4, 5, 6), 0.7);
    let field = structure3d(&volume.view(), 0, 0.0).unwrap();
    assert!(field.iter().all(|&v| v == 0.0));
}

#[test]
fn linear_ramp_along_x_only_fills_first_entry() {
    let slope = 3.0;
    let volume = Array3::from_shape_fn((4, 4, 6), |(_, _, x)| slope * x as f64);
    let field = structure3d(&volume.view(), 0, 0.0).unwrap();

    for ((z, y, x, i, j), &v) in field.indexed_iter() {
        let expected = if (i, j) == (0, 0) { slope * slope } else { 0.0 };
        assert!(
            (v - expected).abs() < 1e-12,
            "entry ({}, {}) at ({}, {}, {}) was {}",
            i,
            j,
            z,
            y,
            x,
            v
        );
    }
}

#[test]
fn box_smoothing_sums_rather_than_averages() {
    // Unit slope along x gives T[..,0,0] = 1 everywhere; a side-3 box sums 27 of them.
    let volume = Array3::from_shape_fn((5, 5, 5), |(_, _, x)| x as f64);
    let field = structure3d(&volume.view(), 3, 0.0).unwrap();

    assert!((field[[2, 2, 2, 0, 0]] - 27.0).abs() < 1e-9);
    assert!((field[[0, 0, 0, 0, 0]] - 8.0).abs() < 1e-9);
    assert_eq!(field[[2, 2, 2, 1, 1]], 0.0);
}

#[test]
fn rgb_replicates_every_voxel() {
    let volume = random_volume((4, 4, 4), 13);
    let rgb = to_rgb(&volume.view());

    assert_eq!(rgb.shape(), &[4, 4, 4, 3]);
    for ((z, y, x), &v) in volume.indexed_iter() {
        assert_eq!(rgb[[z, y, x, 0]], v);
        assert_eq!(rgb[[z, y, x, 1]], v);
        assert_eq!(rgb[[z, y, x, 2]], v);
    }
}

#[test]
fn masked_field_clears_interior_zero_region() {
    let mut volume = random_volume((9, 9, 9), 14).mapv(|v| v + 0.5);
    volume.slice_mut(s![3..6, 3..6, 3..6]).fill(0.0);

    let masked = structure3d_masked(&volume.view(), 3).unwrap();
    let reference = structure3d(&volume.view(), 3, 0.0).unwrap();

    for ((z, y, x), &v) in volume.indexed_iter() {
        let block = masked.slice(s![z, y, x, .., ..]);
        if v == 0.0 {
            assert!(block.iter().all(|&t| t == 0.0));
        } else {
            assert_eq!(block, reference.slice(s![z, y, x, .., ..]));
        }
    }
    // The smoothed reference is nonzero inside the hole; the mask is what clears it.
    assert!(reference.slice(s![4, 4, 4, .., ..]).iter().any(|&t| t != 0.0));
}

#[test]
fn rectified_noise_never_lowers_diagonal() {
    let volume = random_volume((4, 5, 6), 15);
    let clean = structure3d(&volume.view(), 0, 0.0).unwrap();
    let mut raised = 0usize;

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let noisy = structure3d_with_rng(&volume.view(), 0, 0.05, &mut rng).unwrap();
        for d in 0..3 {
            let n = noisy.slice(s![.., .., .., d, d]);
            let c = clean.slice(s![.., .., .., d, d]);
            for (nv, cv) in n.iter().zip(c.iter()) {
                assert!(nv >= cv);
                if nv > cv {
                    raised += 1;
                }
            }
        }
    }
    assert!(raised > 0);
}

#[test]
fn short_axis_is_a_shape_error() {
    let volume = Array3::<f64>::zeros((1, 4, 4));
    assert!(matches!(
        structure3d(&volume.view(), 0, 0.0),
        Err(VolumeError::Shape { axis: 0, len: 1, .. })
    ));
    assert!(matches!(
        structure3d_masked(&volume.view(), 3),
        Err(VolumeError::Shape { .. })
    ));
}

#[test]
fn two_sample_axes_are_accepted() {
    let volume = Array3::from_shape_fn((2, 2, 2), |(z, y, x)| (z + 2 * y + 4 * x) as f64);
    let field = structure3d(&volume.view(), 0, 0.0).unwrap();
    // Gradient (dx, dy, dz) = (4, 2, 1).
    assert_eq!(field[[0, 0, 0, 0, 0]], 16.0);
    assert_eq!(field[[1, 1, 1, 0, 1]], 8.0);
    assert_eq!(field[[1, 0, 1, 2, 2]], 1.0);
}

#[test]
fn nan_voxels_propagate_into_the_field() {
    let mut volume = random_volume((5, 5, 5), 17);
    volume[[2, 2, 2]] = f64::NAN;
    volume[[0, 0, 0]] = f64::NAN;

    let field = structure3d(&volume.view(), 0, 0.0).unwrap();
    // Central differences reach the axis neighbours of an interior voxel.
    assert!(field[[2, 2, 3, 0, 0]].is_nan());
    assert!(field[[2, 3, 2, 1, 1]].is_nan());
    assert!(field[[3, 2, 2, 2, 2]].is_nan());
    // One-sided stencils include the boundary voxel itself.
    assert!(field[[0, 0, 0, 0, 0]].is_nan());
    // Far from both, the field stays finite.
    assert!(field.slice(s![4, 4, 4, .., ..]).iter().all(|v| v.is_finite()));

    let smoothed = structure3d(&volume.view(), 3, 0.0).unwrap();
    assert!(smoothed.slice(s![2, 2, 2, .., ..]).iter().all(|v| v.is_nan()));
    assert!(smoothed.slice(s![2, 2, 3, .., ..]).iter().all(|v| v.is_nan()));

    let masked = structure3d_masked(&volume.view(), 0).unwrap();
    assert!(masked[[2, 2, 3, 0, 0]].is_nan());
    assert!(masked[[0, 0, 0, 0, 0]].is_nan());
}
