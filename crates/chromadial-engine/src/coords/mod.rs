//! Geometry types shared by the rasterizer and the dial renderer.
//!
//! Canonical space:
//! - Surface pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Polar angles are in radians and sweep clockwise from +X, matching the
//! screen-space sign of +Y down.

mod vec2;

pub use vec2::Vec2;
