use std::io::Cursor;

use png::{BitDepth, ColorType};

use crate::mosaic::color::Rgb;

/// Hints carried by the encoded file rather than its pixels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Background color declared by a PNG `bKGD` chunk.
    pub background: Option<Rgb>,
}

impl ImageMetadata {
    /// Never fails; non-PNG input or a missing chunk simply yields no hint.
    pub fn scan(bytes: &[u8]) -> Self {
        Self { background: png_background(bytes) }
    }
}

fn png_background(bytes: &[u8]) -> Option<Rgb> {
    let reader = png::Decoder::new(Cursor::new(bytes)).read_info().ok()?;
    let info = reader.info();
    let data = info.bkgd.as_deref()?;

    let sample = |index: usize| {
        let raw = u16::from_be_bytes([*data.get(index * 2)?, *data.get(index * 2 + 1)?]);
        scale_sample(raw, info.bit_depth)
    };

    match info.color_type {
        ColorType::Grayscale | ColorType::GrayscaleAlpha => sample(0).map(|gray| Rgb([gray; 3])),
        ColorType::Rgb | ColorType::Rgba => Some(Rgb([sample(0)?, sample(1)?, sample(2)?])),
        ColorType::Indexed => {
            let index = *data.first()? as usize * 3;
            info.palette.as_deref()?.get(index..index + 3).map(Rgb::from_sample)
        },
    }
}

/// Rescales a background sample the way decoded pixels are brought to 8 bits.
fn scale_sample(value: u16, bit_depth: BitDepth) -> Option<u8> {
    let value = u32::from(value);
    match bit_depth {
        BitDepth::Sixteen => Some(((value * 255 + 32767) / 65535) as u8),
        BitDepth::Eight => u8::try_from(value).ok(),
        BitDepth::One | BitDepth::Two | BitDepth::Four => {
            let max = (1u32 << bit_depth as u8) - 1;
            (value <= max).then(|| (value * 255 / max) as u8)
        },
    }
}
