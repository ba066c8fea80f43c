//! Paint model shared between the color wheel and the rasterizer.
//!
//! Scope:
//! - color representation (premultiplied alpha, ARGB8888 packing)
//! - the dial's fixed angle→color wheel
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod wheel;

pub use color::Color;
