use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// The one live periodic task: its cancellation channel and thread handle.
struct TickHandle {
    cancel: mpsc::Sender<()>,
    thread: thread::JoinHandle<()>,
}

/// Fixed-delay periodic task runner.
///
/// At most one task is live at a time. The loop runs the tick body first
/// (so the first tick fires immediately on start), then waits the fixed
/// delay on the cancellation channel — dropping the sender doubles as the
/// cancellation token, and any queued-but-unexecuted tick is abandoned with
/// the wait.
///
/// `start`/`stop` are called from the owner's thread; ticks run on a
/// dedicated background thread.
pub struct Ticker {
    handle: Option<TickHandle>,
}

impl Ticker {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Spawns the periodic task. A no-op while a task is already live
    /// (idempotent), so two consecutive starts leave exactly one task.
    pub fn start<F>(&mut self, interval: Duration, mut tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        if self.handle.is_some() {
            log::debug!("tick task already running; start ignored");
            return;
        }

        let (cancel, waiter) = mpsc::channel::<()>();
        let spawned = thread::Builder::new()
            .name("chromadial-tick".into())
            .spawn(move || {
                loop {
                    tick();
                    match waiter.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        // Explicit cancel or the handle went away entirely.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            });

        match spawned {
            Ok(thread) => self.handle = Some(TickHandle { cancel, thread }),
            Err(e) => log::error!("failed to spawn tick thread: {e}"),
        }
    }

    /// Cancels the live task and joins its thread.
    ///
    /// Synchronous: once `stop` returns, no further tick can fire. An
    /// in-flight tick body is allowed to finish; it observes the
    /// cancellation at its next wait. Stopping an idle ticker is a no-op.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            log::debug!("stop with no live tick task");
            return;
        };
        // Wake the wait immediately rather than letting the interval lapse.
        let _ = handle.cancel.send(());
        drop(handle.cancel);
        if handle.thread.join().is_err() {
            log::error!("tick thread panicked");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_ticker(interval_ms: u64) -> (Ticker, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let mut ticker = Ticker::new();
        ticker.start(Duration::from_millis(interval_ms), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (ticker, count)
    }

    #[test]
    fn first_tick_fires_immediately() {
        let (mut ticker, count) = counting_ticker(1_000);
        // Long interval: any count > 0 must come from the immediate tick.
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        ticker.stop();
    }

    #[test]
    fn ticks_repeat_until_stopped() {
        let (mut ticker, count) = counting_ticker(5);
        std::thread::sleep(Duration::from_millis(60));
        ticker.stop();
        let stopped_at = count.load(Ordering::SeqCst);
        assert!(stopped_at >= 2, "only {stopped_at} ticks in 60ms");

        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(count.load(Ordering::SeqCst), stopped_at, "tick after stop");
    }

    #[test]
    fn double_start_keeps_one_task() {
        let (mut ticker, count) = counting_ticker(1_000);
        let orphan = Arc::new(AtomicUsize::new(0));
        let orphan_seen = Arc::clone(&orphan);
        ticker.start(Duration::from_millis(1), move || {
            orphan_seen.fetch_add(1, Ordering::SeqCst);
        });
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(orphan.load(Ordering::SeqCst), 0, "second start took effect");
        assert_eq!(count.load(Ordering::SeqCst), 1);
        ticker.stop();
        assert!(!ticker.is_running());
    }

    #[test]
    fn stop_when_idle_is_a_noop() {
        let mut ticker = Ticker::new();
        ticker.stop();
        assert!(!ticker.is_running());
    }

    #[test]
    fn stop_is_synchronous() {
        let (mut ticker, count) = counting_ticker(5);
        ticker.stop();
        let at_stop = count.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), at_stop);
    }
}
