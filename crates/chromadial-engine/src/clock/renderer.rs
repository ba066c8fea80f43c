use crate::coords::Vec2;
use crate::paint::{wheel, Color};
use crate::raster::{Canvas, Surface};
use crate::text::FontSystem;

use super::{ClockTime, Layout};

// Dial geometry in sixteenths of the face radius.
const OUTER_POS: f32 = 16.0; // outer face ring
const INNER_POS: f32 = 11.0; // inner face ring
const NUMBER_POS: f32 = (OUTER_POS + INNER_POS) / 2.0; // numeral anchors
const SEC_POS: f32 = 10.0; // hand tip radii
const MIN_POS: f32 = 9.0;
const HOUR_POS: f32 = 6.5;
const HOUR_WIDTH: f32 = 0.5; // hand stroke widths
const MIN_WIDTH: f32 = 0.25;
const SEC_WIDTH: f32 = 0.125;
const RING_WIDTH: f32 = 0.125;
const CENTER_POS: f32 = 2.0; // center dot
const CENTER_WIDTH: f32 = 0.5;
const NUMERAL_SIZE: f32 = 3.0; // numeral text size, in band widths

/// Draws the dial onto an exclusively-owned off-screen surface.
///
/// The surface and [`Layout`] are reallocated together on resize; `render`
/// repaints in place. The face rings are filled first each frame, so they
/// double as the clear of everything the previous frame drew — pixels
/// outside the outer ring stay transparent and are the host's to composite.
pub struct ClockRenderer {
    font: Option<FontSystem>,
    layout: Option<Layout>,
    surface: Option<Surface>,
    warned_no_font: bool,
}

impl ClockRenderer {
    pub fn new(font: Option<FontSystem>) -> Self {
        Self {
            font,
            layout: None,
            surface: None,
            warned_no_font: false,
        }
    }

    /// Reallocates the surface and rederives the layout.
    ///
    /// Degenerate sizes are ignored: the previous surface (if any) stays
    /// valid and presentable. Returns whether the surface was replaced.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let Some(layout) = Layout::compute(width, height) else {
            log::debug!("ignoring degenerate resize to {width}x{height}");
            return false;
        };
        self.layout = Some(layout);
        self.surface = Some(Surface::new(width, height));
        true
    }

    /// The last allocated surface. Whether its contents are a *complete*
    /// frame is tracked by the owner (see `ClockFace`), not here.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Repaints the dial for the given instant. A no-op until the first
    /// successful resize.
    pub fn render(&mut self, t: &ClockTime) {
        let Some(layout) = self.layout else { return };
        let Some(surface) = self.surface.as_mut() else { return };
        if self.font.is_none() && !self.warned_no_font {
            log::warn!("no numeral font configured; dial renders without numbers");
            self.warned_no_font = true;
        }

        let hour_angle = t.hour_angle();
        let minute_angle = t.minute_angle();
        let second_angle = t.second_angle();

        let mut canvas = Canvas::new(surface);
        draw_face_ring(&mut canvas, &layout, OUTER_POS, RING_WIDTH);
        draw_face_ring(&mut canvas, &layout, INNER_POS, RING_WIDTH);
        draw_numerals(&mut canvas, &layout, self.font.as_ref());
        draw_tick_marks(&mut canvas, &layout);
        // Hands back to front, each tipped with its wheel-colored joint.
        draw_hand(&mut canvas, &layout, hour_angle, HOUR_POS, HOUR_WIDTH);
        draw_joint(&mut canvas, &layout, hour_angle, HOUR_POS - 2.0, 1.5, HOUR_WIDTH);
        draw_hand(&mut canvas, &layout, minute_angle, MIN_POS, MIN_WIDTH);
        draw_joint(&mut canvas, &layout, minute_angle, MIN_POS - 1.25, 1.0, MIN_WIDTH);
        draw_hand(&mut canvas, &layout, second_angle, SEC_POS, SEC_WIDTH);
        draw_joint(&mut canvas, &layout, second_angle, SEC_POS - 0.75, 0.5, SEC_WIDTH);
        draw_face_ring(&mut canvas, &layout, CENTER_POS, CENTER_WIDTH);
    }
}

// ── drawing helpers ────────────────────────────────────────────────────────

/// A point on the dial: logical angle 0° is 12 o'clock, increasing clockwise;
/// `radius` is in band widths.
fn dial_point(layout: &Layout, angle_deg: f32, radius: f32) -> Vec2 {
    layout.center + Vec2::from_polar((angle_deg - 90.0).to_radians(), radius * layout.band_width)
}

/// White disc with a black outline, centered on the dial.
fn draw_face_ring(canvas: &mut Canvas<'_>, layout: &Layout, radius: f32, stroke: f32) {
    let r = radius * layout.band_width;
    canvas.fill_circle(layout.center, r, Color::WHITE);
    canvas.stroke_circle(layout.center, r, stroke * layout.band_width, Color::BLACK);
}

fn draw_hand(canvas: &mut Canvas<'_>, layout: &Layout, angle: f32, length: f32, width: f32) {
    let tip = dial_point(layout, angle, length);
    canvas.line(layout.center, tip, width * layout.band_width, Color::BLACK);
}

/// The joint marker: a disc on the hand axis just short of the tip, filled
/// with the wheel color for the hand's angle, outlined like the hand.
fn draw_joint(canvas: &mut Canvas<'_>, layout: &Layout, angle: f32, length: f32, radius: f32, width: f32) {
    let center = dial_point(layout, angle, length);
    let r = radius * layout.band_width;
    canvas.fill_circle(center, r, wheel::color_at(angle));
    canvas.stroke_circle(center, r, width * layout.band_width, Color::BLACK);
}

fn draw_numerals(canvas: &mut Canvas<'_>, layout: &Layout, font: Option<&FontSystem>) {
    let Some(font) = font else { return };
    let px = NUMERAL_SIZE * layout.band_width;
    for i in 1..=12u32 {
        let anchor = dial_point(layout, i as f32 * 30.0, NUMBER_POS);
        for g in font.layout_centered(&i.to_string(), px, anchor) {
            canvas.blit_coverage(g.x, g.y, g.width, g.height, &g.coverage, Color::BLACK);
        }
    }
}

/// Sixty radial ticks ending a third of a band inside the inner ring; every
/// fifth is a band long and minute-hand thick, the rest half as long and
/// second-hand thin.
fn draw_tick_marks(canvas: &mut Canvas<'_>, layout: &Layout) {
    let band = layout.band_width;
    let gap = band / 3.0;
    for i in 0..60 {
        let major = i % 5 == 0;
        let angle = (i as f32 * 6.0 - 90.0).to_radians();
        let outer = INNER_POS * band - gap;
        let inner = outer - if major { band } else { band / 2.0 };
        let a = layout.center + Vec2::from_polar(angle, inner);
        let b = layout.center + Vec2::from_polar(angle, outer);
        let width = if major { MIN_WIDTH } else { SEC_WIDTH } * 0.75 * band;
        canvas.line(a, b, width, Color::BLACK);
    }
}
