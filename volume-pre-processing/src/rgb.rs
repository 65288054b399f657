/// Colour replication of scalar volumes for side-by-side display
use constants::stack::RGB_CHANNELS;
use ndarray::{Array4, ArrayView3};

/// Replicate a (Z, Y, X) volume into a (Z, Y, X, 3) volume with three identical channels.
/// Values are copied as-is; encoding to pixels is left to the caller.
pub fn to_rgb<T: Clone>(volume: &ArrayView3<T>) -> Array4<T> {
    let (nz, ny, nx) = volume.dim();
    Array4::from_shape_fn((nz, ny, nx, RGB_CHANNELS), |(z, y, x, _)| {
        volume[[z, y, x]].clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn channels_match_source() {
        let volume = Array3::from_shape_fn((4, 4, 4), |(z, y, x)| (z * 16 + y * 4 + x) as u8);
        let rgb = to_rgb(&volume.view());

        assert_eq!(rgb.shape(), &[4, 4, 4, 3]);
        for ((z, y, x), &v) in volume.indexed_iter() {
            for c in 0..3 {
                assert_eq!(rgb[[z, y, x, c]], v);
            }
        }
    }
}
