// Playback scheduler - the self-rescheduling autoplay timer
//
// Autoplay runs as a spawned tokio task that sends a tick over the widget
// channel, sleeps for the configured interval and repeats until stopped.
// The task owns no navigation state; it only proposes an index. The
// navigation coordinator commits it and the runtime writes the committed
// index back into the shared cursor, so manual navigation during active
// autoplay re-converges: the next tick advances from wherever the user
// left off, not from a stale counter.
//
// Every timer role in the widget is held as a TimerHandle: a typed,
// single-owner cancellation token that is invalidated on rearm and on
// teardown, so no callback can fire against a disposed widget.

use crate::events::WidgetEvent;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Interval used when autoplay is enabled as a plain flag
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(3000);

/// Autoplay settings, immutable after widget initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub enabled: bool,
    pub interval: Duration,
}

impl PlaybackConfig {
    pub fn off() -> Self {
        Self {
            enabled: false,
            interval: DEFAULT_AUTOPLAY_INTERVAL,
        }
    }

    /// Enabled with the default 3 second interval
    pub fn on() -> Self {
        Self {
            enabled: true,
            interval: DEFAULT_AUTOPLAY_INTERVAL,
        }
    }

    pub fn every(interval: Duration) -> Self {
        Self {
            enabled: true,
            interval,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::off()
    }
}

/// Cancellation token for one live timer task
///
/// Exactly one handle exists per timer role. Cancelling (or dropping)
/// aborts the task, so a rearm or teardown can never leave a zombie
/// callback behind.
#[derive(Debug)]
pub struct TimerHandle {
    inner: JoinHandle<()>,
}

impl TimerHandle {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { inner: task }
    }

    /// Abort the underlying task. Consumes the handle; there is nothing
    /// valid to hold afterwards.
    pub fn cancel(self) {
        self.inner.abort();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.inner.abort();
    }
}

/// Drives autoplay: schedules ticks and tracks the autoplay cursor
pub struct PlaybackScheduler {
    cursor: Arc<AtomicUsize>,
    handle: Option<TimerHandle>,
}

impl PlaybackScheduler {
    pub fn new() -> Self {
        Self {
            cursor: Arc::new(AtomicUsize::new(0)),
            handle: None,
        }
    }

    /// Start the autoplay loop.
    ///
    /// The first tick fires immediately with the slide the cursor is
    /// parked on (so a fresh widget shows its first slide right away);
    /// every subsequent tick advances the cursor modulo `slide_count`
    /// after one interval. A zero slide count is a no-op: scheduling
    /// would otherwise divide by zero on the wrap.
    pub fn start(
        &mut self,
        config: &PlaybackConfig,
        slide_count: usize,
        tx: mpsc::Sender<WidgetEvent>,
    ) {
        if !config.enabled {
            return;
        }
        if slide_count == 0 {
            warn!("autoplay requested with an empty slide set, not scheduling");
            return;
        }

        // Rearm: at most one live timer per role
        self.stop();

        let cursor = Arc::clone(&self.cursor);
        let interval = config.interval;
        debug!(?interval, slide_count, "autoplay started");

        let task = tokio::spawn(async move {
            let mut first = true;
            loop {
                let index = if first {
                    cursor.load(Ordering::SeqCst) % slide_count
                } else {
                    (cursor.load(Ordering::SeqCst) + 1) % slide_count
                };
                first = false;

                if tx.send(WidgetEvent::AutoplayTick(index)).await.is_err() {
                    // Widget torn down; channel closed
                    return;
                }
                tokio::time::sleep(interval).await;
            }
        });
        self.handle = Some(TimerHandle::new(task));
    }

    /// Cancel the pending timer. Safe to call when nothing is scheduled.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
            debug!("autoplay stopped");
        }
    }

    #[allow(dead_code)] // Embedder-facing query, exercised in tests
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Re-sync the autoplay cursor to a committed slide index.
    ///
    /// Called on every published slide change, manual or not; this is
    /// what keeps autoplay advancing from the slide the user navigated
    /// to. Subscriber closures go through [`CursorSync`] instead.
    #[allow(dead_code)]
    pub fn sync_cursor(&self, index: usize) {
        self.cursor.store(index, Ordering::SeqCst);
    }

    /// Cheap cloneable handle for re-syncing the cursor from a slide
    /// change subscriber
    pub fn cursor_sync(&self) -> CursorSync {
        CursorSync(Arc::clone(&self.cursor))
    }
}

/// Subscriber-side handle to the autoplay cursor
#[derive(Debug, Clone)]
pub struct CursorSync(Arc<AtomicUsize>);

impl CursorSync {
    pub fn set(&self, index: usize) {
        self.0.store(index, Ordering::SeqCst);
    }
}

impl Default for PlaybackScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn next_tick(rx: &mut mpsc::Receiver<WidgetEvent>) -> usize {
        match rx.recv().await {
            Some(WidgetEvent::AutoplayTick(i)) => i,
            other => panic!("expected autoplay tick, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_advance_modulo_slide_count() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut scheduler = PlaybackScheduler::new();
        scheduler.start(&PlaybackConfig::every(Duration::from_millis(100)), 3, tx);

        // Immediate first tick at the cursor, then +1 per interval
        assert_eq!(next_tick(&mut rx).await, 0);
        scheduler.sync_cursor(0);
        assert_eq!(next_tick(&mut rx).await, 1);
        scheduler.sync_cursor(1);
        assert_eq!(next_tick(&mut rx).await, 2);
        scheduler.sync_cursor(2);
        // Wraps back to the start
        assert_eq!(next_tick(&mut rx).await, 0);

        scheduler.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_resyncs_cursor() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut scheduler = PlaybackScheduler::new();
        scheduler.start(&PlaybackConfig::every(Duration::from_millis(100)), 5, tx);

        assert_eq!(next_tick(&mut rx).await, 0);
        // User jumps to slide 3 while autoplay runs
        scheduler.sync_cursor(3);
        // Next tick advances from the manual position, not the stale one
        assert_eq!(next_tick(&mut rx).await, 4);

        scheduler.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_slide_count_never_schedules() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut scheduler = PlaybackScheduler::new();
        scheduler.start(&PlaybackConfig::on(), 0, tx);

        assert!(!scheduler.is_running());
        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_config_never_schedules() {
        let (tx, _rx) = mpsc::channel(8);
        let mut scheduler = PlaybackScheduler::new();
        scheduler.start(&PlaybackConfig::off(), 5, tx);

        assert!(!scheduler.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut scheduler = PlaybackScheduler::new();
        scheduler.start(&PlaybackConfig::on(), 3, tx);

        assert_eq!(next_tick(&mut rx).await, 0);
        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());

        // Nothing fires after cancellation
        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_the_timer() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut scheduler = PlaybackScheduler::new();
        let config = PlaybackConfig::every(Duration::from_millis(100));

        scheduler.start(&config, 3, tx.clone());
        assert_eq!(next_tick(&mut rx).await, 0);

        scheduler.start(&config, 3, tx);
        assert!(scheduler.is_running());
        // The replacement loop starts over from the cursor
        assert_eq!(next_tick(&mut rx).await, 0);
    }
}
