/// Extension used for written slice images
pub const STACK_EXTENSION: &str = "bmp";

/// Extensions accepted when reading a slice directory
pub const SUPPORTED_STACK_EXTENSIONS: &[&str] = &["bmp", "png", "tif", "tiff"];

/// Scale from [0, 1] intensities to 8-bit pixels
pub const PIXEL_SCALE: f64 = 255.0;

/// Colour channels in an RGB volume
pub const RGB_CHANNELS: usize = 3;
