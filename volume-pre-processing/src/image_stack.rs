/// Numbered bitmap stacks: one image file per z slice
use crate::error::{VolumeError, VolumeResult};
use crate::progress::progress_bar;
use constants::stack::{PIXEL_SCALE, RGB_CHANNELS, STACK_EXTENSION, SUPPORTED_STACK_EXTENSIONS};
use image::{GrayImage, Luma, Rgb, RgbImage};
use ndarray::{Array3, ArrayView3, ArrayView4, Axis};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name for slice `index` of a stack with `slices` entries.
/// The index is zero-padded to the number of digits in `slices`.
pub fn slice_file_name(prefix: &str, index: usize, slices: usize) -> String {
    let digits = slices.to_string().len();
    format!("{}{:0width$}.{}", prefix, index, STACK_EXTENSION, width = digits)
}

/// Convert a [0, 1] intensity to an 8-bit pixel.
/// Saturates outside the range and truncates the fraction.
fn to_pixel(value: f64) -> u8 {
    (value * PIXEL_SCALE) as u8
}

/// Save a (Z, Y, X) volume as 8-bit grayscale bitmaps named `prefix` + index.
pub fn save_gray_stack(prefix: &str, volume: &ArrayView3<f64>) -> VolumeResult<Vec<PathBuf>> {
    let (nz, ny, nx) = volume.dim();
    let pb = progress_bar(nz as u64, "slices", "Writing grayscale stack");
    let mut paths = Vec::with_capacity(nz);

    for (z, slice) in volume.axis_iter(Axis(0)).enumerate() {
        let image = GrayImage::from_fn(nx as u32, ny as u32, |x, y| {
            Luma([to_pixel(slice[[y as usize, x as usize]])])
        });
        let path = PathBuf::from(slice_file_name(prefix, z, nz));
        image.save(&path)?;
        paths.push(path);
        pb.inc(1);
    }

    pb.finish_with_message("Grayscale stack written");
    info!("Saved {} grayscale slices with prefix {}", nz, prefix);
    Ok(paths)
}

/// Save a (Z, Y, X, 3) volume as 8-bit RGB bitmaps named `prefix` + index.
pub fn save_color_stack(prefix: &str, rgb: &ArrayView4<f64>) -> VolumeResult<Vec<PathBuf>> {
    let (nz, ny, nx, channels) = rgb.dim();
    if channels != RGB_CHANNELS {
        return Err(VolumeError::invalid("channels", channels));
    }

    let pb = progress_bar(nz as u64, "slices", "Writing colour stack");
    let mut paths = Vec::with_capacity(nz);

    for (z, slice) in rgb.axis_iter(Axis(0)).enumerate() {
        let image = RgbImage::from_fn(nx as u32, ny as u32, |x, y| {
            let (x, y) = (x as usize, y as usize);
            Rgb([
                to_pixel(slice[[y, x, 0]]),
                to_pixel(slice[[y, x, 1]]),
                to_pixel(slice[[y, x, 2]]),
            ])
        });
        let path = PathBuf::from(slice_file_name(prefix, z, nz));
        image.save(&path)?;
        paths.push(path);
        pb.inc(1);
    }

    pb.finish_with_message("Colour stack written");
    info!("Saved {} colour slices with prefix {}", nz, prefix);
    Ok(paths)
}

/// Slice images in `dir`, sorted by file name.
pub fn discover_slices(dir: &Path) -> VolumeResult<Vec<PathBuf>> {
    let mut slices = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(extension) = path.extension() {
            let ext = extension.to_string_lossy().to_lowercase();
            if SUPPORTED_STACK_EXTENSIONS.contains(&ext.as_str()) {
                slices.push(path);
            }
        }
    }

    slices.sort();
    Ok(slices)
}

/// Load a directory of slice images into a (Z, Y, X) volume of raw 0-255 values.
pub fn load_gray_stack(dir: &Path) -> VolumeResult<Array3<f64>> {
    let slices = discover_slices(dir)?;
    if slices.is_empty() {
        return Err(VolumeError::EmptyStack(dir.display().to_string()));
    }

    let pb = progress_bar(slices.len() as u64, "slices", "Reading stack");
    let mut volume: Option<Array3<f64>> = None;
    let mut expected = (0, 0);

    for (z, path) in slices.iter().enumerate() {
        let image = image::open(path)?.to_luma8();
        let dims = image.dimensions();

        let target = volume.get_or_insert_with(|| {
            expected = dims;
            Array3::zeros((slices.len(), dims.1 as usize, dims.0 as usize))
        });
        if dims != expected {
            return Err(VolumeError::SliceMismatch {
                index: z,
                expected,
                got: dims,
            });
        }

        for (x, y, pixel) in image.enumerate_pixels() {
            target[[z, y as usize, x as usize]] = pixel.0[0] as f64;
        }
        pb.inc(1);
    }

    pb.finish_with_message("Stack read");
    let volume = volume.ok_or_else(|| VolumeError::EmptyStack(dir.display().to_string()))?;
    info!("Loaded {} slices from {} as {:?}", slices.len(), dir.display(), volume.shape());
    Ok(volume)
}
