//! Synthetic volume generation and per-voxel structure tensors for 3D
//! grayscale volumes, with `.npy` and bitmap stack output for visualisation.
pub mod bounds;
pub mod converter;
pub mod error;
pub mod gradient;
pub mod image_stack;
pub mod manifest;
pub mod npy;
pub mod progress;
pub mod rgb;
pub mod smoothing;
pub mod structure_tensor;
pub mod synthetic;

pub use converter::{TensorFieldConverter, TensorOptions};
pub use error::{VolumeError, VolumeResult};
pub use rgb::to_rgb;
pub use structure_tensor::{TensorField, structure3d, structure3d_masked, structure3d_with_rng};
