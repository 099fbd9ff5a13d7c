pub mod raster;
pub mod record;

use crate::mosaic::color::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// One bold character to draw, horizontally centred on `x` with the top of
/// its ascent at `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphDraw {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Fill and stroke color.
    pub color: Rgb,
}

/// Drawing backend the compositor paints onto.
pub trait DrawSurface {
    fn dimensions(&self) -> (u32, u32);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    fn draw_glyph(&mut self, glyph: &GlyphDraw);
}
