use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Error returned by [`FontSystem::from_bytes`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// A glyph bitmap positioned in surface space, ready to blit.
#[derive(Debug, Clone)]
pub struct RasterGlyph {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
    /// 8-bit coverage, row-major, `width * height` bytes.
    pub coverage: Vec<u8>,
}

/// Owns the single font face used for the dial numerals.
///
/// Fonts are immutable after loading. Glyphs are rasterized per call; the
/// dial redraws twelve short strings per frame, so no atlas or cache is
/// carried.
pub struct FontSystem {
    font: fontdue::Font,
}

impl FontSystem {
    /// Parses a TrueType or OpenType font from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self { font })
    }

    /// Computes the ink bounding box of `text` laid out at `px`.
    ///
    /// Returns `(width, height)` in pixels, zero for strings with no visible
    /// glyphs.
    #[must_use]
    pub fn measure(&self, text: &str, px: f32) -> Vec2 {
        match self.ink_bounds(text, px) {
            Some((lo, hi)) => hi - lo,
            None => Vec2::zero(),
        }
    }

    /// Lays out `text` at `px` so its ink bounding box is centered on
    /// `center`, and rasterizes every visible glyph.
    ///
    /// Centering on the ink box (not the advance box) matches how the dial
    /// numerals are anchored: the visible digits sit symmetrically around
    /// the anchor point, including the vertical baseline correction.
    pub fn layout_centered(&self, text: &str, px: f32, center: Vec2) -> Vec<RasterGlyph> {
        let Some((lo, hi)) = self.ink_bounds(text, px) else {
            return Vec::new();
        };
        let offset = center - (lo + hi) / 2.0;

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.font], &TextStyle::new(text, px, 0));

        layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| {
                let (metrics, coverage) = self.font.rasterize_config(g.key);
                RasterGlyph {
                    x: (g.x + offset.x).round() as i32,
                    y: (g.y + offset.y).round() as i32,
                    width: metrics.width,
                    height: metrics.height,
                    coverage,
                }
            })
            .collect()
    }

    // ── private helpers ────────────────────────────────────────────────────

    /// Ink extents of `text` laid out at the layout origin, or `None` when
    /// nothing would be drawn.
    fn ink_bounds(&self, text: &str, px: f32) -> Option<(Vec2, Vec2)> {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.font], &TextStyle::new(text, px, 0));

        let mut bounds: Option<(Vec2, Vec2)> = None;
        for g in layout.glyphs() {
            if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                continue;
            }
            let lo = Vec2::new(g.x, g.y);
            let hi = Vec2::new(g.x + g.width as f32, g.y + g.height as f32);
            bounds = Some(match bounds {
                None => (lo, hi),
                Some((blo, bhi)) => (
                    Vec2::new(blo.x.min(lo.x), blo.y.min(lo.y)),
                    Vec2::new(bhi.x.max(hi.x), bhi.y.max(hi.y)),
                ),
            });
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Loads a system font for tests; skips the test body when none exists
    /// on the machine (CI images without font packages).
    fn test_font() -> Option<FontSystem> {
        [
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/noto/NotoSans-Regular.ttf",
            "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        ]
        .iter()
        .find_map(|p| std::fs::read(p).ok())
        .and_then(|bytes| FontSystem::from_bytes(&bytes).ok())
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(FontSystem::from_bytes(&[0u8; 64]).is_err());
    }

    #[test]
    fn measure_returns_nonzero_ink_box() {
        let Some(font) = test_font() else { return };
        let size = font.measure("12", 32.0);
        assert!(size.x > 0.0 && size.y > 0.0);
        // Two digits are wider than one.
        assert!(size.x > font.measure("1", 32.0).x);
    }

    #[test]
    fn layout_centered_centers_the_ink_box() {
        let Some(font) = test_font() else { return };
        let center = Vec2::new(100.0, 80.0);
        let glyphs = font.layout_centered("12", 32.0, center);
        assert!(!glyphs.is_empty());

        let lo_x = glyphs.iter().map(|g| g.x).min().unwrap() as f32;
        let hi_x = glyphs.iter().map(|g| g.x + g.width as i32).max().unwrap() as f32;
        let lo_y = glyphs.iter().map(|g| g.y).min().unwrap() as f32;
        let hi_y = glyphs.iter().map(|g| g.y + g.height as i32).max().unwrap() as f32;

        assert!(((lo_x + hi_x) / 2.0 - center.x).abs() <= 1.0);
        assert!(((lo_y + hi_y) / 2.0 - center.y).abs() <= 1.0);
    }

    #[test]
    fn glyph_coverage_matches_dimensions() {
        let Some(font) = test_font() else { return };
        for g in font.layout_centered("10", 24.0, Vec2::new(50.0, 50.0)) {
            assert_eq!(g.coverage.len(), g.width * g.height);
        }
    }
}
