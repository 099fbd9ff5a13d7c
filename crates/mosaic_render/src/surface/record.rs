use super::{DrawSurface, GlyphDraw, Rect};
use crate::mosaic::color::Rgb;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawEvent {
    Fill { rect: Rect, color: Rgb },
    Glyph(GlyphDraw),
}

/// Surface that keeps every draw call in order instead of rasterizing.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    events: Vec<DrawEvent>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, events: Vec::new() }
    }

    pub fn events(&self) -> &[DrawEvent] {
        &self.events
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphDraw> + '_ {
        self.events.iter().filter_map(|event| match event {
            DrawEvent::Glyph(glyph) => Some(glyph),
            DrawEvent::Fill { .. } => None,
        })
    }

    /// Characters drawn so far, in draw order.
    pub fn text(&self) -> String {
        self.glyphs().map(|glyph| glyph.ch).collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.events.push(DrawEvent::Fill { rect, color });
    }

    fn draw_glyph(&mut self, glyph: &GlyphDraw) {
        self.events.push(DrawEvent::Glyph(glyph.clone()));
    }
}
