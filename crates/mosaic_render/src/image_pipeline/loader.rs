use std::fs;
use std::path::Path;

use image::{DynamicImage, ImageError};
use log::debug;

use super::metadata::ImageMetadata;
use crate::mosaic::color::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channels {
    Rgb,
    Rgba,
}

impl Channels {
    pub fn count(self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }
}

/// Row-major 8-bit samples, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Returns `None` when `data` does not hold exactly `width * height` samples.
    pub fn new(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|samples| samples.checked_mul(channels.count()))?;
        if data.len() != expected {
            return None;
        }
        Some(Self { width, height, channels, data })
    }

    pub fn from_colors(width: u32, height: u32, colors: &[Rgb]) -> Option<Self> {
        let data = colors.iter().flat_map(|color| color.0).collect();
        Self::new(width, height, Channels::Rgb, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let row_len = (self.width as usize * self.channels.count()).max(1);
        self.data.chunks_exact(row_len)
    }

    /// Colors of one row, alpha dropped.
    pub fn row_colors<'a>(&self, row: &'a [u8]) -> impl Iterator<Item = Rgb> + 'a {
        row.chunks_exact(self.channels.count()).map(Rgb::from_sample)
    }
}

#[derive(Clone, Debug)]
pub struct SourceImage {
    pub grid: PixelGrid,
    pub metadata: ImageMetadata,
}

impl SourceImage {
    pub fn new(grid: PixelGrid, metadata: ImageMetadata) -> Self {
        Self { grid, metadata }
    }

    pub fn from_dynamic(image: DynamicImage, metadata: ImageMetadata) -> Self {
        let (width, height) = (image.width(), image.height());
        let (channels, data) = if image.color().has_alpha() {
            (Channels::Rgba, image.into_rgba8().into_raw())
        } else {
            (Channels::Rgb, image.into_rgb8().into_raw())
        };
        let grid = PixelGrid { width, height, channels, data };
        Self { grid, metadata }
    }

    pub fn width(&self) -> u32 {
        self.grid.width
    }

    pub fn height(&self) -> u32 {
        self.grid.height
    }
}

pub fn load_path(path: &Path) -> Result<SourceImage, ImageError> {
    let bytes = fs::read(path).map_err(ImageError::IoError)?;
    let source = load_bytes(&bytes)?;
    debug!(
        "decoded {} as {}x{} {:?}",
        path.display(),
        source.width(),
        source.height(),
        source.grid.channels
    );
    Ok(source)
}

pub fn load_bytes(bytes: &[u8]) -> Result<SourceImage, ImageError> {
    let image = image::load_from_memory(bytes)?;
    let metadata = ImageMetadata::scan(bytes);
    Ok(SourceImage::from_dynamic(image, metadata))
}
