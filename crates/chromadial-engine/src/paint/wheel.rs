//! The dial's fixed angle→color wheel.
//!
//! Four 90°-wide segments trace a hue/value path around the face, saturation
//! pinned at 1:
//!
//! | angle     | hue                 | value     |
//! |-----------|---------------------|-----------|
//! | [0,90)    | 0 → 60 red→yellow   | 1         |
//! | [90,180)  | 60 → 120 → green    | 1 → 0.5   |
//! | [180,270) | 120 → 240 → blue    | 0.5 → 1   |
//! | [270,360) | 240 → 360 → red     | 1         |
//!
//! So 12 o'clock is red, 3 is yellow, 6 is dark green, 9 is blue, wrapping
//! back to red. The value dip keeps the lower half of the wheel legible
//! against the white face.

use crate::paint::Color;

/// Returns the wheel color for a dial angle in degrees.
///
/// The angle is reduced with `rem_euclid`, so any finite input (negatives
/// included) lands in exactly one segment; the four ranges cover all of
/// [0,360) with no gap at 90/180/270.
pub fn color_at(theta: f32) -> Color {
    let theta = theta.rem_euclid(360.0);
    let (h, v) = if theta < 90.0 {
        (theta * (60.0 / 90.0), 1.0)
    } else if theta < 180.0 {
        ((theta - 90.0) * (60.0 / 90.0) + 60.0, 1.0 - (theta - 90.0) / 180.0)
    } else if theta < 270.0 {
        ((theta - 180.0) * (120.0 / 90.0) + 120.0, (theta - 180.0) / 180.0 + 0.5)
    } else {
        ((theta - 270.0) * (120.0 / 90.0) + 240.0, 1.0)
    };
    Color::from_hsv(h, 1.0, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-4
            && (a.g - b.g).abs() < 1e-4
            && (a.b - b.b).abs() < 1e-4
            && (a.a - b.a).abs() < 1e-4
    }

    // ── segment boundaries ────────────────────────────────────────────────

    #[test]
    fn top_is_red() {
        assert!(close(color_at(0.0), Color::from_hsv(0.0, 1.0, 1.0)));
    }

    #[test]
    fn right_is_yellow() {
        assert!(close(color_at(90.0), Color::from_hsv(60.0, 1.0, 1.0)));
    }

    #[test]
    fn bottom_is_dark_green() {
        assert!(close(color_at(180.0), Color::from_hsv(120.0, 1.0, 0.5)));
    }

    #[test]
    fn left_is_blue() {
        assert!(close(color_at(270.0), Color::from_hsv(240.0, 1.0, 1.0)));
    }

    // ── periodicity ───────────────────────────────────────────────────────

    #[test]
    fn full_turn_wraps_to_red() {
        assert!(close(color_at(360.0), color_at(0.0)));
        assert!(close(color_at(720.0), color_at(0.0)));
    }

    #[test]
    fn periodic_for_arbitrary_angles() {
        for theta in [13.0f32, 91.5, 200.25, 359.0] {
            assert!(close(color_at(theta + 360.0), color_at(theta)));
            assert!(close(color_at(theta - 720.0), color_at(theta)));
        }
    }

    #[test]
    fn negative_angles_normalize() {
        assert!(close(color_at(-90.0), color_at(270.0)));
    }

    // ── continuity ────────────────────────────────────────────────────────

    #[test]
    fn no_jump_at_segment_seams() {
        for seam in [90.0f32, 180.0, 270.0, 360.0] {
            let before = color_at(seam - 1e-3);
            let after = color_at(seam);
            assert!((before.r - after.r).abs() < 1e-2, "seam at {seam}");
            assert!((before.g - after.g).abs() < 1e-2, "seam at {seam}");
            assert!((before.b - after.b).abs() < 1e-2, "seam at {seam}");
        }
    }
}
