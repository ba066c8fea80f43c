//! Text stack for the dial numerals.
//!
//! Wraps fontdue behind a small loading/measuring/rasterizing API. The
//! engine never bundles font bytes; hosts load a face and hand it to
//! `FaceConfig`.

mod font_system;

pub use font_system::{FontLoadError, FontSystem, RasterGlyph};
