//! CPU rasterization target and painter.
//!
//! Responsibilities:
//! - own the off-screen ARGB8888 pixel buffer the renderer draws into
//! - evaluate shape coverage per pixel (signed distance, 1-px AA edge)
//! - composite premultiplied-over, in paint order
//!
//! Presentation is not handled here; hosts blit a completed `Surface`.

mod canvas;
mod surface;

pub use canvas::Canvas;
pub use surface::Surface;
