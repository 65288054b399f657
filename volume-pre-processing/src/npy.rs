/// NumPy `.npy` persistence for volumes and tensor fields
use crate::error::{VolumeError, VolumeResult};
use crate::structure_tensor::TensorField;
use constants::tensor::SPATIAL_AXES;
use ndarray::{Array3, Array4};
use ndarray_npy::{ReadNpyError, ReadNpyExt, WritableElement, WriteNpyError, write_npy};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

fn write_error(path: &Path, error: WriteNpyError) -> VolumeError {
    VolumeError::Npy(format!("failed to write {}: {}", path.display(), error))
}

fn read_error(path: &Path, error: ReadNpyError) -> VolumeError {
    match error {
        ReadNpyError::WrongNdim(_, got) => VolumeError::Dimensionality {
            expected: SPATIAL_AXES,
            got,
        },
        other => VolumeError::Npy(format!("failed to read {}: {}", path.display(), other)),
    }
}

/// Persist a tensor field as float32 with shape (Z, Y, X, 3, 3).
pub fn save_tensor_field(path: &Path, field: &TensorField) -> VolumeResult<()> {
    write_npy(path, &field.mapv(|v| v as f32)).map_err(|e| write_error(path, e))?;
    info!("Saved {} (tensor field {:?}, float32)", path.display(), field.shape());
    Ok(())
}

/// Persist an RGB volume with its own element type.
pub fn save_rgb_volume<T: WritableElement>(path: &Path, rgb: &Array4<T>) -> VolumeResult<()> {
    write_npy(path, rgb).map_err(|e| write_error(path, e))?;
    info!("Saved {} (RGB volume {:?})", path.display(), rgb.shape());
    Ok(())
}

/// Persist a scalar volume as float32.
pub fn save_volume(path: &Path, volume: &Array3<f64>) -> VolumeResult<()> {
    write_npy(path, &volume.mapv(|v| v as f32)).map_err(|e| write_error(path, e))?;
    info!("Saved {} (volume {:?}, float32)", path.display(), volume.shape());
    Ok(())
}

/// Load a 3D scalar volume stored as float64, float32 or uint8.
pub fn load_volume(path: &Path) -> VolumeResult<Array3<f64>> {
    let bytes = fs::read(path)?;

    let volume = match Array3::<f64>::read_npy(bytes.as_slice()) {
        Err(ReadNpyError::WrongDescriptor(_)) => {
            match Array3::<f32>::read_npy(bytes.as_slice()) {
                Err(ReadNpyError::WrongDescriptor(_)) => {
                    debug!("{} is not float, trying uint8", path.display());
                    Array3::<u8>::read_npy(bytes.as_slice()).map(|v| v.mapv(f64::from))
                }
                read => read.map(|v| v.mapv(f64::from)),
            }
        }
        read => read,
    }
    .map_err(|e| read_error(path, e))?;

    info!("Loaded {} ({:?})", path.display(), volume.shape());
    Ok(volume)
}
