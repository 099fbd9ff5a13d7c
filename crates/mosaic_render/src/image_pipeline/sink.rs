use std::path::Path;

use image::{ImageFormat, RgbImage};
use log::debug;

use crate::MosaicError;

/// Writes the finished canvas as PNG.
pub fn write_png(canvas: &RgbImage, path: &Path) -> Result<(), MosaicError> {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return Err(MosaicError::EmptyCanvas { width, height });
    }

    canvas.save_with_format(path, ImageFormat::Png).map_err(MosaicError::Encode)?;
    debug!("wrote {width}x{height} canvas to {}", path.display());
    Ok(())
}
