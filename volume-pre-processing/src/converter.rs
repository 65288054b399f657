/// Volume to tensor field converter orchestrating loading, computation and output.
use crate::bounds::IntensityRange;
use crate::error::{VolumeError, VolumeResult};
use crate::image_stack::load_gray_stack;
use crate::manifest::TensorFieldManifest;
use crate::npy::{load_volume, save_rgb_volume, save_tensor_field};
use crate::rgb::to_rgb;
use crate::structure_tensor::{TensorField, structure3d_masked, structure3d_with_rng};
use constants::tensor::{RGB_VOLUME_FILE, TENSOR_ELEMENT_TYPE, TENSOR_FIELD_FILE};
use ndarray::Array3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Parameters of one conversion run.
#[derive(Debug, Clone, Default)]
pub struct TensorOptions {
    /// Box kernel side, 0 for no smoothing.
    pub sigma: i64,
    /// Standard deviation of rectified noise, 0 for none.
    pub noise: f64,
    /// Clear tensors at zero-valued voxels. Requires `noise == 0`.
    pub mask: bool,
    /// Fixed noise seed; entropy is used when absent.
    pub seed: Option<u64>,
    /// Rescale the input to [0, 1] before computing.
    pub normalize: bool,
    /// Also write the RGB replication of the (possibly normalised) input.
    pub write_rgb: bool,
}

/// Converts a scalar volume on disk into a persisted structure tensor field.
pub struct TensorFieldConverter {
    /// `.npy` volume file or directory of slice images.
    input_path: PathBuf,
    /// Output directory for the tensor field and manifest.
    output_dir: PathBuf,
}

impl TensorFieldConverter {
    /// Create converter, validating the input path and creating the output directory.
    pub fn new(input_path: &Path, output_dir: &Path) -> VolumeResult<Self> {
        if !input_path.exists() {
            return Err(VolumeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("input does not exist: {}", input_path.display()),
            )));
        }
        fs::create_dir_all(output_dir)?;

        Ok(Self {
            input_path: input_path.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Load the input as a (Z, Y, X) volume.
    /// Directories are read as image stacks, anything else as `.npy`.
    pub fn load_input(&self) -> VolumeResult<Array3<f64>> {
        if self.input_path.is_dir() {
            load_gray_stack(&self.input_path)
        } else {
            load_volume(&self.input_path)
        }
    }

    /// Execute the complete pipeline and return the written manifest.
    pub fn convert(&self, options: &TensorOptions) -> VolumeResult<TensorFieldManifest> {
        info!(
            "Converting {} to structure tensor field in {}",
            self.input_path.display(),
            self.output_dir.display()
        );

        let mut volume = self.load_input()?;
        let intensity = IntensityRange::of(&volume.view());
        self.log_volume_info(&volume, &intensity);

        if options.normalize {
            volume = intensity.normalize_volume(&volume.view());
            debug!("Normalised input to [0, 1]");
        }

        let field = self.compute_field(&volume, options)?;

        let tensor_path = self.output_dir.join(TENSOR_FIELD_FILE);
        save_tensor_field(&tensor_path, &field)?;

        let rgb_file = if options.write_rgb {
            let rgb = to_rgb(&volume.mapv(|v| v as f32).view());
            save_rgb_volume(&self.output_dir.join(RGB_VOLUME_FILE), &rgb)?;
            Some(RGB_VOLUME_FILE.to_string())
        } else {
            None
        };

        let (nz, ny, nx) = volume.dim();
        let manifest = TensorFieldManifest {
            source: self.input_path.display().to_string(),
            shape: [nz, ny, nx],
            sigma: options.sigma,
            noise: options.noise,
            masked: options.mask,
            seed: options.seed,
            normalized: options.normalize,
            intensity,
            tensor_file: TENSOR_FIELD_FILE.to_string(),
            rgb_file,
            element_type: TENSOR_ELEMENT_TYPE.to_string(),
        };
        manifest.write(&self.output_dir)?;

        info!("Conversion complete!");
        Ok(manifest)
    }

    /// Compute the tensor field with the masked or the noisy variant.
    fn compute_field(
        &self,
        volume: &Array3<f64>,
        options: &TensorOptions,
    ) -> VolumeResult<TensorField> {
        if options.mask {
            if options.noise != 0.0 {
                return Err(VolumeError::invalid("noise", options.noise));
            }
            return structure3d_masked(&volume.view(), options.sigma);
        }

        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        structure3d_with_rng(&volume.view(), options.sigma, options.noise, &mut rng)
    }

    /// Log volume shape, memory footprint and intensity range.
    fn log_volume_info(&self, volume: &Array3<f64>, intensity: &IntensityRange) {
        let voxels = volume.len();
        info!("Volume Information:");
        info!("  Shape (z, y, x): {:?}", volume.shape());
        info!("  Voxels: {}", voxels);
        info!(
            "  Tensor field: {} values ({:.1} MiB as float32)",
            voxels * 9,
            (voxels * 9 * 4) as f64 / (1024.0 * 1024.0)
        );
        info!("  Intensity: {:.3} to {:.3}", intensity.min, intensity.max);
    }
}
