//! Tick scheduling.
//!
//! One periodic background task on a fixed-delay cadence: each wait starts
//! after the previous tick body finishes, so tick bodies never overlap and a
//! slow tick simply pushes the next one back instead of piling up.

mod ticker;

pub use ticker::Ticker;
