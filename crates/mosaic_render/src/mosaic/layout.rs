/// Largest canvas, in pixels, a render will allocate.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 30;

/// Spacing ratios between neighbouring glyph cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Justification {
    pub x: f64,
    pub y: f64,
}

impl Justification {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn uniform(ratio: f64) -> Self {
        Self { x: ratio, y: ratio }
    }

    /// `adjust`, when present, replaces both axes.
    pub fn resolve(x: f64, y: f64, adjust: Option<f64>) -> Self {
        match adjust {
            Some(ratio) => Self::uniform(ratio),
            None => Self::new(x, y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasGeometry {
    pub width: u32,
    pub height: u32,
    pub text_size: u32,
    pub justification: Justification,
}

impl CanvasGeometry {
    /// Output size is truncated, never rounded.
    pub fn derive(
        source_width: u32,
        source_height: u32,
        text_size: u32,
        justification: Justification,
    ) -> Self {
        let width = (source_width as f64 * text_size as f64 * justification.x) as u32;
        let height = (source_height as f64 * text_size as f64 * justification.y) as u32;
        Self { width, height, text_size, justification }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Sizes past `u32::MAX` saturate in [`CanvasGeometry::derive`] and always land above the limit.
    pub fn exceeds_limit(&self) -> bool {
        u64::from(self.width) * u64::from(self.height) > MAX_CANVAS_PIXELS
    }

    /// Anchor of the glyph for the sample at `column` in `row`.
    pub fn glyph_anchor(&self, column: u32, row: u32) -> (f32, f32) {
        let size = self.text_size as f64;
        let offset = (self.text_size / 2) as f64;
        let x = column as f64 * size * self.justification.x + offset;
        let y = row as f64 * size * self.justification.y + offset;
        (x as f32, y as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_overrides_both_axes() {
        assert_eq!(Justification::resolve(0.8, 0.6, Some(0.9)), Justification::new(0.9, 0.9));
        assert_eq!(Justification::resolve(0.8, 0.6, None), Justification::new(0.8, 0.6));
    }

    #[test]
    fn dimensions_truncate() {
        let geometry = CanvasGeometry::derive(3, 2, 7, Justification::uniform(0.9));
        assert_eq!((geometry.width, geometry.height), (18, 12));

        let geometry = CanvasGeometry::derive(1, 1, 1, Justification::uniform(0.5));
        assert!(geometry.is_empty());
    }

    #[test]
    fn oversized_canvas_exceeds_limit() {
        let saturated = CanvasGeometry::derive(1, 1, 4_000_000_000, Justification::uniform(2.0));
        assert_eq!(saturated.width, u32::MAX);
        assert!(saturated.exceeds_limit());

        assert!(CanvasGeometry::derive(1, 1, 32_769, Justification::uniform(1.0)).exceeds_limit());
        assert!(!CanvasGeometry::derive(1, 1, 32_768, Justification::uniform(1.0)).exceeds_limit());
        assert!(!CanvasGeometry::derive(640, 480, 20, Justification::uniform(0.7)).exceeds_limit());
    }

    #[test]
    fn anchors_follow_grid_with_half_size_offset() {
        let geometry = CanvasGeometry::derive(4, 4, 20, Justification::new(0.7, 0.8));
        assert_eq!(geometry.glyph_anchor(0, 0), (10.0, 10.0));
        assert_eq!(geometry.glyph_anchor(2, 1), (38.0, 26.0));

        let odd = CanvasGeometry::derive(4, 4, 11, Justification::uniform(1.0));
        assert_eq!(odd.glyph_anchor(1, 0), (16.0, 5.0));
    }
}
