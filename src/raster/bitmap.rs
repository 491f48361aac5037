//! 24-bit BMP output.

use std::path::Path;

use image::{ExtendedColorType, ImageFormat};
use log::info;

use super::buffer::ImageBuffer;
use crate::error::FarmError;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "julia.bmp";

/// Write a completed raster to `path` as an uncompressed 24-bit bitmap.
///
/// Fails with [`FarmError::Incomplete`] if any row is still missing; nothing is
/// written in that case.
pub fn write_bitmap<P: AsRef<Path>>(img: &ImageBuffer, path: P) -> Result<(), FarmError> {
    img.ensure_complete()?;
    let dims_err = || FarmError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    };
    let width = u32::try_from(img.width()).map_err(|_| dims_err())?;
    let height = u32::try_from(img.height()).map_err(|_| dims_err())?;
    let path = path.as_ref();
    image::save_buffer_with_format(
        path,
        &img.to_rgb_bytes(),
        width,
        height,
        ExtendedColorType::Rgb8,
        ImageFormat::Bmp,
    )?;
    info!("wrote {}x{} bitmap to {}", width, height, path.display());
    Ok(())
}
