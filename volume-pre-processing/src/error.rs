/// Error types for volume and tensor field processing.
use thiserror::Error;

/// Result alias used throughout the crate.
pub type VolumeResult<T> = Result<T, VolumeError>;

#[derive(Debug, Error)]
pub enum VolumeError {
    /// An axis is too short to take a gradient over.
    #[error("axis {axis} has {len} samples, at least {min} are required")]
    Shape { axis: usize, len: usize, min: usize },

    /// An array of the wrong rank was supplied or loaded.
    #[error("expected a {expected}-dimensional array, got {got} dimensions")]
    Dimensionality { expected: usize, got: usize },

    /// A numeric parameter is outside its valid range.
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// Slices of an image stack disagree on their dimensions.
    #[error("slice {index} is {got:?}, expected {expected:?}")]
    SliceMismatch {
        index: usize,
        expected: (u32, u32),
        got: (u32, u32),
    },

    /// No slice images were found.
    #[error("no slice images found in {0}")]
    EmptyStack(String),

    /// Malformed or unsupported .npy content.
    #[error("npy error: {0}")]
    Npy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VolumeError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString) -> Self {
        VolumeError::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}
