use log::debug;

use super::color::Rgb;
use super::cursor::TextCursor;
use super::layout::{CanvasGeometry, Justification};
use crate::image_pipeline::loader::SourceImage;
use crate::image_pipeline::metadata::ImageMetadata;
use crate::surface::{DrawSurface, GlyphDraw, Rect};
use crate::{ConfigError, MosaicError, MosaicOptions};

pub const DEFAULT_BACKGROUND: Rgb = Rgb::WHITE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundSource {
    Override,
    Metadata,
    Default,
}

/// Reported once per row, before the row is scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowProgress {
    pub row: u32,
    pub rows: u32,
}

impl RowProgress {
    pub fn ratio(&self) -> f32 {
        if self.rows == 0 {
            1.0
        } else {
            self.row as f32 / self.rows as f32
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComposeSummary {
    pub geometry: CanvasGeometry,
    pub background: Rgb,
    pub background_source: BackgroundSource,
    pub glyphs_drawn: usize,
    /// Characters taken from the text, counting wraps.
    pub text_consumed: usize,
}

/// Turns every non-background pixel into one glyph of a cycling text.
#[derive(Clone, Debug)]
pub struct Compositor {
    text_size: u32,
    justification: Justification,
    background: Option<Rgb>,
    background_consume_text: bool,
}

impl Compositor {
    pub fn new(options: &MosaicOptions) -> Result<Self, ConfigError> {
        let justification = options.validate()?;
        Ok(Self {
            text_size: options.text_size,
            justification,
            background: options.background,
            background_consume_text: options.background_consume_text,
        })
    }

    pub fn geometry(&self, source_width: u32, source_height: u32) -> CanvasGeometry {
        CanvasGeometry::derive(source_width, source_height, self.text_size, self.justification)
    }

    /// Override first, then the file's own hint, then white.
    pub fn resolve_background(&self, metadata: &ImageMetadata) -> (Rgb, BackgroundSource) {
        match (self.background, metadata.background) {
            (Some(color), _) => (color, BackgroundSource::Override),
            (None, Some(color)) => (color, BackgroundSource::Metadata),
            (None, None) => (DEFAULT_BACKGROUND, BackgroundSource::Default),
        }
    }

    pub fn compose<S: DrawSurface>(
        &self,
        surface: &mut S,
        source: &SourceImage,
        text: &str,
    ) -> Result<ComposeSummary, MosaicError> {
        self.compose_with_progress(surface, source, text, |_| {})
    }

    pub fn compose_with_progress<S, F>(
        &self,
        surface: &mut S,
        source: &SourceImage,
        text: &str,
        mut progress: F,
    ) -> Result<ComposeSummary, MosaicError>
    where
        S: DrawSurface,
        F: FnMut(RowProgress),
    {
        let mut cursor = TextCursor::new(text).ok_or(ConfigError::EmptyText)?;
        let grid = &source.grid;
        let geometry = self.geometry(grid.width(), grid.height());
        debug_assert_eq!(surface.dimensions(), (geometry.width, geometry.height));

        let (background, background_source) = self.resolve_background(&source.metadata);
        debug!(
            "composing {}x{} canvas on background {background} ({background_source:?})",
            geometry.width, geometry.height
        );

        surface.fill_rect(Rect::new(0, 0, geometry.width, geometry.height), background);

        let rows = grid.height();
        let mut glyphs_drawn = 0;
        for (row_index, row) in grid.rows().enumerate() {
            let row_index = row_index as u32;
            progress(RowProgress { row: row_index, rows });

            for (column, color) in grid.row_colors(row).enumerate() {
                if color == background && !self.background_consume_text {
                    continue;
                }

                let (x, y) = geometry.glyph_anchor(column as u32, row_index);
                surface.draw_glyph(&GlyphDraw {
                    ch: cursor.next_char(),
                    x,
                    y,
                    size: self.text_size as f32,
                    color,
                });
                glyphs_drawn += 1;
            }
        }

        debug!("drew {glyphs_drawn} glyphs");

        Ok(ComposeSummary {
            geometry,
            background,
            background_source,
            glyphs_drawn,
            text_consumed: cursor.consumed(),
        })
    }
}
