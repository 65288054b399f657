/// Voxel intensity range tracking and normalisation
use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityRange {
    pub min: f64,
    pub max: f64,
}

impl Default for IntensityRange {
    fn default() -> Self {
        Self::new()
    }
}

impl IntensityRange {
    /// Create new range initialised to infinity values
    pub fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Range covering every voxel of a volume
    pub fn of(volume: &ArrayView3<f64>) -> Self {
        volume.iter().fold(Self::new(), |mut range, &v| {
            range.update(v);
            range
        })
    }

    /// Update range with a new value
    pub fn update(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Width of the range
    pub fn extent(&self) -> f64 {
        self.max - self.min
    }

    /// Normalise a value to 0-1 range. A flat range maps to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let extent = self.extent();
        if extent > 0.0 {
            (value - self.min) / extent
        } else {
            0.0
        }
    }

    /// Normalised copy of a volume
    pub fn normalize_volume(&self, volume: &ArrayView3<f64>) -> Array3<f64> {
        volume.mapv(|v| self.normalize(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_to_unit_range() {
        let volume = Array3::from_shape_fn((2, 2, 2), |(z, y, x)| (z * 4 + y * 2 + x) as f64 * 10.0 + 5.0);
        let range = IntensityRange::of(&volume.view());
        assert_eq!(range.min, 5.0);
        assert_eq!(range.max, 75.0);

        let unit = range.normalize_volume(&volume.view());
        assert_eq!(unit[[0, 0, 0]], 0.0);
        assert_eq!(unit[[1, 1, 1]], 1.0);
    }

    #[test]
    fn flat_range_maps_to_zero() {
        let range = IntensityRange { min: 3.0, max: 3.0 };
        assert_eq!(range.normalize(3.0), 0.0);
    }
}
