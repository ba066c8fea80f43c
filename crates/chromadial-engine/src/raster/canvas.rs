use crate::coords::Vec2;
use crate::paint::Color;

use super::Surface;

/// CPU painter over a borrowed [`Surface`].
///
/// Shapes are evaluated as signed distance fields, sampled at pixel centers
/// with a 1-px anti-aliased edge, and composited premultiplied-over in call
/// order. Strokes get round caps from the distance metric itself, so no
/// separate cap geometry is needed.
pub struct Canvas<'a> {
    surface: &'a mut Surface,
}

impl<'a> Canvas<'a> {
    pub fn new(surface: &'a mut Surface) -> Self {
        Self { surface }
    }

    /// Fills a solid disc.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 || !center.is_finite() {
            return;
        }
        let pad = radius + 1.0;
        self.paint_sdf(
            center - Vec2::new(pad, pad),
            center + Vec2::new(pad, pad),
            color,
            |p| (p - center).length() - radius,
        );
    }

    /// Strokes a circle outline of the given stroke width.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if radius <= 0.0 || width <= 0.0 || !center.is_finite() {
            return;
        }
        let half = width / 2.0;
        let pad = radius + half + 1.0;
        self.paint_sdf(
            center - Vec2::new(pad, pad),
            center + Vec2::new(pad, pad),
            color,
            |p| ((p - center).length() - radius).abs() - half,
        );
    }

    /// Strokes a line segment with round caps.
    pub fn line(&mut self, a: Vec2, b: Vec2, width: f32, color: Color) {
        if width <= 0.0 || !a.is_finite() || !b.is_finite() {
            return;
        }
        let half = width / 2.0;
        let pad = Vec2::new(half + 1.0, half + 1.0);
        let lo = Vec2::new(a.x.min(b.x), a.y.min(b.y)) - pad;
        let hi = Vec2::new(a.x.max(b.x), a.y.max(b.y)) + pad;
        let ba = b - a;
        let len_sq = ba.dot(ba);
        self.paint_sdf(lo, hi, color, |p| {
            let pa = p - a;
            // Degenerate segment collapses to the cap disc at `a`.
            let t = if len_sq > 0.0 { (pa.dot(ba) / len_sq).clamp(0.0, 1.0) } else { 0.0 };
            (pa - ba * t).length() - half
        });
    }

    /// Blits an 8-bit coverage bitmap (e.g. a rasterized glyph), tinted with
    /// `color`. `x`/`y` position the bitmap's top-left corner.
    pub fn blit_coverage(&mut self, x: i32, y: i32, width: usize, height: usize, coverage: &[u8], color: Color) {
        if coverage.len() < width * height {
            return;
        }
        for row in 0..height {
            let py = y + row as i32;
            if py < 0 || py as u32 >= self.surface.height() {
                continue;
            }
            for col in 0..width {
                let px = x + col as i32;
                if px < 0 || px as u32 >= self.surface.width() {
                    continue;
                }
                let cov = coverage[row * width + col];
                if cov == 0 {
                    continue;
                }
                self.composite(px as u32, py as u32, color.scaled(cov as f32 / 255.0));
            }
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    /// Samples `dist` at every pixel center inside the clamped bounding box
    /// and composites `color` scaled by edge coverage.
    fn paint_sdf(&mut self, lo: Vec2, hi: Vec2, color: Color, dist: impl Fn(Vec2) -> f32) {
        let w = self.surface.width();
        let h = self.surface.height();
        if w == 0 || h == 0 {
            return;
        }
        let x0 = lo.x.floor().max(0.0) as u32;
        let y0 = lo.y.floor().max(0.0) as u32;
        let x1 = (hi.x.ceil().min(w as f32 - 1.0).max(0.0)) as u32;
        let y1 = (hi.y.ceil().min(h as f32 - 1.0).max(0.0)) as u32;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                // Coverage ramps over one pixel centered on the zero contour.
                let cov = (0.5 - dist(p)).clamp(0.0, 1.0);
                if cov > 0.0 {
                    self.composite(px, py, color.scaled(cov));
                }
            }
        }
    }

    #[inline]
    fn composite(&mut self, x: u32, y: u32, src: Color) {
        let idx = (y * self.surface.width() + x) as usize;
        let dst = Color::from_argb8888(self.surface.pixels()[idx]);
        self.surface.pixels_mut()[idx] = src.over(dst).to_argb8888();
    }
}
