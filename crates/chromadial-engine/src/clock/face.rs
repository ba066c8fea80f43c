use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Local;

use crate::raster::Surface;
use crate::text::FontSystem;
use crate::tick::Ticker;

use super::{ClockRenderer, ClockTime};

/// Lifecycle of the shared off-screen frame.
///
/// `Empty` until the first completed render; `Drawing` while the tick (or a
/// resize repaint) holds the surface; `Ready` when the buffer is complete
/// and safe to blit.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FramePhase {
    Empty,
    Drawing,
    Ready,
}

/// Construction-time options for [`ClockFace`].
pub struct FaceConfig {
    /// Font for the dial numerals. Without one the dial renders numberless
    /// (warned once at render time).
    pub font: Option<FontSystem>,
    /// Fixed delay between ticks.
    pub tick_interval: Duration,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            font: None,
            tick_interval: Duration::from_millis(50),
        }
    }
}

type PresentHook = Arc<dyn Fn() + Send + Sync>;

struct FaceCore {
    renderer: ClockRenderer,
    phase: FramePhase,
}

impl FaceCore {
    /// Samples the live clock and repaints. Runs with the core lock held, so
    /// the `Drawing` span is exactly the span a presenter can't observe.
    fn redraw(&mut self, t: &ClockTime) {
        self.phase = FramePhase::Drawing;
        self.renderer.render(t);
        self.phase = FramePhase::Ready;
    }
}

/// The host-facing clock component.
///
/// A plain composed object: hosts construct it on attach, call [`start`]
/// on resume and [`stop`] on pause, forward size changes to [`resize`], and
/// blit frames through [`with_frame`] whenever the present hook fires (or on
/// their own display cadence).
///
/// Concurrency: the tick loop draws on its own thread; the single core lock
/// plus [`FramePhase`] hand completed frames to the presentation path.
/// [`with_frame`] never blocks — while a draw is in flight it returns `None`
/// and the host re-requests presentation instead of reading a torn buffer.
///
/// [`start`]: ClockFace::start
/// [`stop`]: ClockFace::stop
/// [`resize`]: ClockFace::resize
/// [`with_frame`]: ClockFace::with_frame
pub struct ClockFace {
    core: Arc<Mutex<FaceCore>>,
    present: Arc<Mutex<Option<PresentHook>>>,
    ticker: Ticker,
    interval: Duration,
}

impl ClockFace {
    pub fn new(config: FaceConfig) -> Self {
        Self {
            core: Arc::new(Mutex::new(FaceCore {
                renderer: ClockRenderer::new(config.font),
                phase: FramePhase::Empty,
            })),
            present: Arc::new(Mutex::new(None)),
            ticker: Ticker::new(),
            interval: config.tick_interval,
        }
    }

    /// Registers the presentation callback fired after every completed
    /// frame. Called from the tick thread; keep it cheap (typically a
    /// redraw request).
    pub fn set_present_hook(&mut self, hook: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut present) = self.present.lock() {
            *present = Some(Arc::new(hook));
        }
    }

    /// Resizes the off-screen surface and repaints immediately, so a resized
    /// face is never presented stale or empty. Degenerate sizes are ignored
    /// and leave the previous frame presentable.
    pub fn resize(&mut self, width: u32, height: u32) {
        {
            let Ok(mut core) = self.core.lock() else { return };
            if !core.renderer.resize(width, height) {
                return;
            }
            core.redraw(&ClockTime::sample(Local::now().naive_local()));
        }
        notify(&self.present);
    }

    /// Starts the 50 ms tick loop. Idempotent: a second `start` while
    /// running changes nothing.
    pub fn start(&mut self) {
        log::debug!("resuming dial ticks");
        let core = Arc::clone(&self.core);
        let present = Arc::clone(&self.present);
        self.ticker.start(self.interval, move || {
            let t = ClockTime::sample(Local::now().naive_local());
            if let Ok(mut core) = core.lock() {
                core.redraw(&t);
            }
            notify(&present);
        });
    }

    /// Stops ticking. Returns only once no further tick can fire; an
    /// in-flight redraw is allowed to complete. Idempotent: stopping an
    /// already-idle face is a no-op.
    pub fn stop(&mut self) {
        log::debug!("pausing dial ticks");
        self.ticker.stop();
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Runs `f` against the latest complete frame.
    ///
    /// Non-blocking: returns `None` while a draw is in flight or before the
    /// first frame exists, in which case the host should simply ask again
    /// (e.g. schedule another redraw) rather than wait.
    pub fn with_frame<R>(&self, f: impl FnOnce(&Surface) -> R) -> Option<R> {
        let core = self.core.try_lock().ok()?;
        if core.phase != FramePhase::Ready {
            return None;
        }
        core.renderer.surface().map(f)
    }
}

impl Drop for ClockFace {
    fn drop(&mut self) {
        // The tick closure holds an Arc to the core; reap the thread so it
        // cannot outlive the host's component.
        self.ticker.stop();
    }
}

fn notify(present: &Mutex<Option<PresentHook>>) {
    let hook = match present.lock() {
        Ok(slot) => slot.clone(),
        Err(_) => None,
    };
    if let Some(hook) = hook {
        hook();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn face() -> ClockFace {
        ClockFace::new(FaceConfig::default())
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn no_frame_before_first_resize() {
        let f = face();
        assert!(f.with_frame(|_| ()).is_none());
    }

    #[test]
    fn resize_produces_a_presentable_frame() {
        let mut f = face();
        f.resize(300, 300);
        let dims = f.with_frame(|s| (s.width(), s.height()));
        assert_eq!(dims, Some((300, 300)));
    }

    #[test]
    fn degenerate_resize_keeps_the_previous_frame() {
        let mut f = face();
        f.resize(0, 0);
        assert!(f.with_frame(|_| ()).is_none());
        f.resize(300, 300);
        f.resize(0, 0);
        assert!(f.with_frame(|_| ()).is_some());
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn ticks_drive_presentation() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);

        let mut f = ClockFace::new(FaceConfig {
            tick_interval: Duration::from_millis(5),
            ..FaceConfig::default()
        });
        f.resize(64, 64);
        f.set_present_hook(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        f.start();
        thread::sleep(Duration::from_millis(60));
        f.stop();
        assert!(hits.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn stop_halts_presentation() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);

        let mut f = ClockFace::new(FaceConfig {
            tick_interval: Duration::from_millis(5),
            ..FaceConfig::default()
        });
        f.resize(64, 64);
        f.set_present_hook(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        f.start();
        thread::sleep(Duration::from_millis(40));
        f.stop();
        let at_stop = hits.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(40));
        assert_eq!(hits.load(Ordering::SeqCst), at_stop, "tick fired after stop");
    }

    #[test]
    fn start_is_idempotent_and_stop_safe_when_idle() {
        let mut f = face();
        f.resize(64, 64);
        f.start();
        f.start();
        assert!(f.is_running());
        f.stop();
        assert!(!f.is_running());
        f.stop(); // already idle: documented no-op
    }
}
