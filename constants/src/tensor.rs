/// Default output name for a persisted structure tensor field
pub const TENSOR_FIELD_FILE: &str = "tensorfield.npy";

/// Default output name for a persisted RGB volume
pub const RGB_VOLUME_FILE: &str = "rgb_vol.npy";

/// Default output name for a generated scalar volume
pub const VOLUME_FILE: &str = "volume.npy";

/// Run description written next to the tensor field
pub const MANIFEST_FILE: &str = "manifest.json";

/// Box kernel side used by the masked tensor variant when none is given
pub const DEFAULT_MASK_SIGMA: i64 = 3;

/// Spatial axes of a scalar volume, ordered (z, y, x)
pub const SPATIAL_AXES: usize = 3;

/// Side of the per-voxel tensor block
pub const TENSOR_DIM: usize = 3;

/// Fewest samples along an axis the gradient can be taken over
pub const MIN_AXIS_LEN: usize = 2;

/// Element type tensor fields are stored as
pub const TENSOR_ELEMENT_TYPE: &str = "float32";
