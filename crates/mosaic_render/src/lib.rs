mod font;
mod image_pipeline;
mod mosaic;
mod surface;

use std::path::Path;

use image::RgbImage;
use log::info;

pub use font::{load_font, FontError, FontSpec, DEFAULT_FONT_FAMILY};
pub use image_pipeline::{
    loader::{load_bytes, load_path, Channels, PixelGrid, SourceImage},
    metadata::ImageMetadata,
    sink::write_png,
};
pub use mosaic::{
    color::{ParseRgbError, Rgb},
    compose::{BackgroundSource, ComposeSummary, Compositor, RowProgress, DEFAULT_BACKGROUND},
    cursor::TextCursor,
    layout::{CanvasGeometry, Justification, MAX_CANVAS_PIXELS},
};
pub use surface::{
    raster::RasterSurface,
    record::{DrawEvent, RecordingSurface},
    DrawSurface, GlyphDraw, Rect,
};

#[derive(Debug, thiserror::Error)]
pub enum MosaicError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("cannot encode an empty {width}x{height} canvas")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("a {width}x{height} canvas exceeds the limit of {} pixels", MAX_CANVAS_PIXELS)]
    CanvasTooLarge { width: u32, height: u32 },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Font(#[from] FontError),
}

impl MosaicError {
    /// Whether the failure happened while writing the output.
    pub fn is_encode(&self) -> bool {
        matches!(
            self,
            MosaicError::Encode(_)
                | MosaicError::EmptyCanvas { .. }
                | MosaicError::CanvasTooLarge { .. }
        )
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("text size must be at least 1")]
    ZeroTextSize,
    #[error("{axis} justification must be a positive finite ratio, got {value}")]
    InvalidJustification { axis: char, value: f64 },
    #[error("adjust must be a positive finite ratio, got {0}")]
    InvalidAdjust(f64),
    #[error("text must contain at least one character")]
    EmptyText,
}

#[derive(Clone, Debug)]
pub struct MosaicOptions {
    /// Glyph size in output pixels.
    pub text_size: u32,
    pub font: FontSpec,
    /// Horizontal spacing ratio between neighbouring glyphs.
    pub x_just: f64,
    /// Vertical spacing ratio between neighbouring rows.
    pub y_just: f64,
    /// Overrides both `x_just` and `y_just` when set.
    pub adjust: Option<f64>,
    /// Wins over any background declared by the image file.
    pub background: Option<Rgb>,
    /// Draw glyphs on background pixels too.
    pub background_consume_text: bool,
}

impl Default for MosaicOptions {
    fn default() -> Self {
        Self {
            text_size: 20,
            font: FontSpec::default(),
            x_just: 0.8,
            y_just: 0.8,
            adjust: None,
            background: None,
            background_consume_text: false,
        }
    }
}

impl MosaicOptions {
    /// Validated spacing ratios with `adjust` applied.
    pub fn validate(&self) -> Result<Justification, ConfigError> {
        if self.text_size == 0 {
            return Err(ConfigError::ZeroTextSize);
        }

        if let Some(adjust) = self.adjust {
            if !is_positive_ratio(adjust) {
                return Err(ConfigError::InvalidAdjust(adjust));
            }
        }

        let justification = Justification::resolve(self.x_just, self.y_just, self.adjust);
        for (axis, value) in [('x', justification.x), ('y', justification.y)] {
            if !is_positive_ratio(value) {
                return Err(ConfigError::InvalidJustification { axis, value });
            }
        }

        Ok(justification)
    }
}

fn is_positive_ratio(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub canvas: RgbImage,
    pub summary: ComposeSummary,
}

impl RenderOutput {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MosaicError> {
        write_png(&self.canvas, path.as_ref())
    }
}

#[derive(Default)]
pub struct MosaicRenderer;

impl MosaicRenderer {
    pub fn render_path<P: AsRef<Path>>(
        &self,
        path: P,
        text: &str,
        options: &MosaicOptions,
    ) -> Result<RenderOutput, MosaicError> {
        self.render_path_with_progress(path, text, options, |_| {})
    }

    /// Configuration is checked before the input is decoded.
    pub fn render_path_with_progress<P, F>(
        &self,
        path: P,
        text: &str,
        options: &MosaicOptions,
        progress: F,
    ) -> Result<RenderOutput, MosaicError>
    where
        P: AsRef<Path>,
        F: FnMut(RowProgress),
    {
        options.validate()?;
        if TextCursor::new(text).is_none() {
            return Err(ConfigError::EmptyText.into());
        }

        let source = load_path(path.as_ref()).map_err(MosaicError::Decode)?;
        self.render_image(&source, text, options, progress)
    }

    pub fn render_image<F>(
        &self,
        source: &SourceImage,
        text: &str,
        options: &MosaicOptions,
        progress: F,
    ) -> Result<RenderOutput, MosaicError>
    where
        F: FnMut(RowProgress),
    {
        let compositor = Compositor::new(options)?;
        let geometry = compositor.geometry(source.width(), source.height());
        if geometry.exceeds_limit() {
            return Err(MosaicError::CanvasTooLarge {
                width: geometry.width,
                height: geometry.height,
            });
        }
        let font = load_font(&options.font)?;

        let mut surface = RasterSurface::new(geometry.width, geometry.height, font);
        let summary = compositor.compose_with_progress(&mut surface, source, text, progress)?;
        Ok(RenderOutput { canvas: surface.into_image(), summary })
    }

    /// Decode, compose and encode in one pass. Nothing is written on failure.
    pub fn render_to_file<P, Q, F>(
        &self,
        input: P,
        text: &str,
        output: Q,
        options: &MosaicOptions,
        progress: F,
    ) -> Result<ComposeSummary, MosaicError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        F: FnMut(RowProgress),
    {
        let rendered = self.render_path_with_progress(input, text, options, progress)?;
        rendered.save(output.as_ref())?;
        info!(
            "rendered {} glyphs onto {}x{} canvas at {}",
            rendered.summary.glyphs_drawn,
            rendered.summary.geometry.width,
            rendered.summary.geometry.height,
            output.as_ref().display()
        );
        Ok(rendered.summary)
    }
}
