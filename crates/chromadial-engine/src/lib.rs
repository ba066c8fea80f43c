//! chromadial engine crate.
//!
//! Owns the dial model, CPU rasterization, and tick-scheduling pieces
//! consumed by host layers. Hosts embed [`clock::ClockFace`] and keep
//! windowing/presentation to themselves.

pub mod clock;
pub mod tick;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod text;
