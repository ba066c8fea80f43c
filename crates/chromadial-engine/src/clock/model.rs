use std::f32::consts::PI;

use chrono::{NaiveDateTime, Timelike};

/// Dial-ready decomposition of one wall-clock instant.
///
/// Invariant:
/// - `minutes` holds a whole number: it is floored *after* `hours` is derived
///   from the unfloored value, so the hour hand advances continuously within
///   the hour while the minute hand jumps on whole-minute boundaries.
///
/// Built fresh on every tick and immutable once built.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClockTime {
    /// Fractional hour of day in `[0, 24)`.
    pub hours: f32,
    /// Whole minute of hour in `[0, 60)`.
    pub minutes: f32,
    /// Eased fractional second of minute in `[0, 60)`.
    pub seconds: f32,
}

impl ClockTime {
    /// Decomposes a local wall-clock instant.
    ///
    /// Pure function of the input; callers resolve "now" themselves (the
    /// tick loop passes `Local::now().naive_local()`).
    pub fn sample(now: NaiveDateTime) -> Self {
        let sec_whole = now.second() as f32;
        // chrono reports leap seconds as nanosecond() >= 1e9; clamp so the
        // eased fraction stays in [0, 1).
        let millis = (now.nanosecond() / 1_000_000).min(999);
        let seconds = sec_whole + ease_sub_second(millis as f32 / 1000.0);
        let mut minutes = now.minute() as f32 + seconds / 60.0;
        let hours = now.hour() as f32 + minutes / 60.0;
        minutes = minutes.floor();
        Self { hours, minutes, seconds }
    }

    #[inline]
    pub fn hour_angle(&self) -> f32 {
        self.hours * 30.0 // 360/12
    }

    #[inline]
    pub fn minute_angle(&self) -> f32 {
        self.minutes * 6.0 // 360/60
    }

    #[inline]
    pub fn second_angle(&self) -> f32 {
        self.seconds * 6.0
    }
}

/// Sine S-curve over the sub-second fraction.
///
/// The second hand lingers at each whole second and sweeps quickly through
/// the middle — a stylistic choice, kept exactly:
/// `(1 − sin((0.5 − frac)·π)) / 2`.
#[inline]
fn ease_sub_second(frac: f32) -> f32 {
    (1.0 - ((0.5 - frac) * PI).sin()) / 2.0
}
