/// Run manifest linking a tensor field to the volume and parameters it came from.
use crate::bounds::IntensityRange;
use crate::error::VolumeResult;
use constants::tensor::MANIFEST_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Description of one tensor field conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorFieldManifest {
    /// Input volume file or slice directory.
    pub source: String,
    /// Volume shape in (z, y, x) order.
    pub shape: [usize; 3],
    /// Box kernel side, 0 when unsmoothed.
    pub sigma: i64,
    /// Standard deviation of injected noise, 0 when noiseless.
    pub noise: f64,
    /// Whether zero-valued voxels were cleared.
    pub masked: bool,
    /// Seed used for noise, if one was fixed.
    pub seed: Option<u64>,
    /// Whether the input was rescaled to [0, 1] first.
    pub normalized: bool,
    /// Input intensity range before normalisation.
    pub intensity: IntensityRange,
    /// Tensor field file relative to the output directory.
    pub tensor_file: String,
    /// RGB volume file relative to the output directory, if written.
    pub rgb_file: Option<String>,
    pub element_type: String,
}

impl TensorFieldManifest {
    /// Write as pretty JSON into `output_dir`.
    pub fn write(&self, output_dir: &Path) -> VolumeResult<PathBuf> {
        let manifest_path = output_dir.join(MANIFEST_FILE);
        let manifest_json = serde_json::to_string_pretty(self)?;
        fs::write(&manifest_path, manifest_json)?;

        info!("Generated manifest: {}", manifest_path.display());
        self.log_summary();
        Ok(manifest_path)
    }

    /// Read a manifest written by [`TensorFieldManifest::write`].
    pub fn read(path: &Path) -> VolumeResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn log_summary(&self) {
        info!("Manifest Summary:");
        info!("  Source: {}", self.source);
        info!("  Shape: {:?} -> {:?}x3x3", self.shape, self.shape);
        info!(
            "  Intensity: {:.3} to {:.3}{}",
            self.intensity.min,
            self.intensity.max,
            if self.normalized { " (normalised)" } else { "" }
        );
        info!(
            "  Sigma {}, noise {}, masked {}",
            self.sigma, self.noise, self.masked
        );
        match &self.rgb_file {
            Some(rgb) => info!("  RGB volume: {}", rgb),
            None => info!("  No RGB volume written"),
        }
    }
}
