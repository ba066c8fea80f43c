//! Dial domain: wall-clock decomposition, face geometry, the dial renderer,
//! and the host-facing facade.
//!
//! Data flow per tick: [`ClockTime::sample`] → [`ClockRenderer::render`] →
//! off-screen surface → present hook. [`ClockFace`] composes the pieces and
//! owns the frame-phase handoff between the tick thread and the host.

mod face;
mod layout;
mod model;
mod renderer;

pub use face::{ClockFace, FaceConfig, FramePhase};
pub use layout::Layout;
pub use model::ClockTime;
pub use renderer::ClockRenderer;
