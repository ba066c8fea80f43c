use crate::coords::Vec2;

/// Margin kept clear on every side of the dial, in pixels.
const MARGIN: f32 = 8.0;

/// Dial geometry derived from the surface size.
///
/// `band_width` is the renderer's base unit of scale: the face radius split
/// into sixteenths. Every drawing offset and stroke width is a multiple of
/// it, so the whole dial scales with the surface.
///
/// Recomputed on every resize, otherwise immutable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Layout {
    pub center: Vec2,
    pub band_width: f32,
}

impl Layout {
    /// Derives the layout for a surface, or `None` when the size cannot hold
    /// a dial (zero or smaller than the margins).
    pub fn compute(width: u32, height: u32) -> Option<Self> {
        let w = width as f32;
        let h = height as f32;
        let radius = (w - 2.0 * MARGIN).min(h - 2.0 * MARGIN) / 2.0;
        if radius <= 0.0 {
            return None;
        }
        Some(Self {
            center: Vec2::new(w / 2.0, h / 2.0),
            band_width: radius / 16.0,
        })
    }
}
