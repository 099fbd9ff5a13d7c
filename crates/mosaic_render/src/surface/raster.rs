use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::RgbImage;

use super::{DrawSurface, GlyphDraw, Rect};
use crate::mosaic::color::Rgb;

/// In-memory RGB canvas that rasterizes glyphs with a single font.
pub struct RasterSurface {
    canvas: RgbImage,
    font: FontVec,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, font: FontVec) -> Self {
        Self { canvas: RgbImage::new(width, height), font }
    }

    pub fn into_image(self) -> RgbImage {
        self.canvas
    }
}

impl DrawSurface for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let (width, height) = self.canvas.dimensions();
        let x_end = rect.x.saturating_add(rect.width).min(width);
        let y_end = rect.y.saturating_add(rect.height).min(height);
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                self.canvas.put_pixel(x, y, image::Rgb(color.0));
            }
        }
    }

    fn draw_glyph(&mut self, glyph: &GlyphDraw) {
        let scale = PxScale::from(glyph.size);
        let scaled = self.font.as_scaled(scale);
        let id = self.font.glyph_id(glyph.ch);
        let origin = point(glyph.x - scaled.h_advance(id) / 2.0, glyph.y + scaled.ascent());

        let Some(outlined) = self.font.outline_glyph(id.with_scale_and_position(scale, origin))
        else {
            return;
        };

        let bounds = outlined.px_bounds();
        let (width, height) = self.canvas.dimensions();
        let ink = glyph.color.to_ratio();
        let canvas = &mut self.canvas;

        outlined.draw(|glyph_x, glyph_y, coverage| {
            let x = bounds.min.x as i32 + glyph_x as i32;
            let y = bounds.min.y as i32 + glyph_y as i32;
            if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                return;
            }

            let coverage = coverage.clamp(0.0, 1.0);
            let pixel = canvas.get_pixel_mut(x as u32, y as u32);
            let under = Rgb(pixel.0).to_ratio();
            let blended =
                [0, 1, 2].map(|channel| under[channel] * (1.0 - coverage) + ink[channel] * coverage);
            *pixel = image::Rgb(Rgb::from_ratio(blended).0);
        });
    }
}
