//! Frame ticker shared by every running animation.
//!
//! The controller owns the registered [`Animator`]s and a background tokio
//! interval. The interval only exists while at least one animation is
//! registered: registering the first starts it, removing the last aborts it.
//! Ticks flow through a single-slot channel, so a slow consumer sees one
//! pending tick rather than a backlog.

use std::future;
use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::Error;

new_key_type! {
    /// Identifies a registered animation.
    pub struct AnimationHandle;
}

/// Something that advances with wall-clock time.
pub trait Animator: Send {
    /// Advance by `dt`. Returns `true` once the animation is complete.
    fn advance(&mut self, dt: Duration) -> bool;
}

impl<F> Animator for F
where
    F: FnMut(Duration) -> bool + Send,
{
    fn advance(&mut self, dt: Duration) -> bool {
        self(dt)
    }
}

struct Ticker {
    rx: mpsc::Receiver<Instant>,
    task: JoinHandle<()>,
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Registry of live animations plus the lazily-started frame ticker.
pub struct AnimationController {
    animations: SlotMap<AnimationHandle, Box<dyn Animator>>,
    frame: Duration,
    ticker: Option<Ticker>,
    stopped: bool,
}

impl AnimationController {
    /// Create a controller ticking at `fps` frames per second. Zero is
    /// treated as one.
    pub fn new(fps: u32) -> Self {
        let fps = fps.max(1);
        Self {
            animations: SlotMap::with_key(),
            frame: Duration::from_secs(1) / fps,
            ticker: None,
            stopped: false,
        }
    }

    /// Duration of one frame.
    pub fn frame_interval(&self) -> Duration {
        self.frame
    }

    /// Number of registered animations.
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Whether no animations are registered.
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Whether the background ticker is running.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Whether [`stop`](Self::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Register an animation. Starts the ticker if this is the first one.
    ///
    /// Returns `None` once the controller has been stopped.
    pub fn register(&mut self, animator: impl Animator + 'static) -> Option<AnimationHandle> {
        if self.stopped {
            tracing::debug!("animation registered after stop; ignored");
            return None;
        }
        let handle = self.animations.insert(Box::new(animator));
        self.ensure_ticker();
        Some(handle)
    }

    /// Remove an animation. Stops the ticker if none remain.
    pub fn unregister(&mut self, handle: AnimationHandle) -> bool {
        let removed = self.animations.remove(handle).is_some();
        if removed && self.animations.is_empty() {
            self.ticker = None;
        }
        removed
    }

    /// The tick receiver, or `None` when nothing is animating.
    pub fn tick(&mut self) -> Option<&mut mpsc::Receiver<Instant>> {
        self.ticker.as_mut().map(|t| &mut t.rx)
    }

    /// Wait for the next tick. Never resolves while nothing is animating.
    ///
    /// Animations registered before a runtime existed get their ticker here.
    pub async fn next_tick(&mut self) -> Option<Instant> {
        self.ensure_ticker();
        match self.tick() {
            Some(rx) => rx.recv().await,
            None => future::pending().await,
        }
    }

    /// Advance every animation by one frame, dropping those that complete.
    ///
    /// Returns how many completed.
    pub fn update(&mut self) -> usize {
        let frame = self.frame;
        let finished: Vec<AnimationHandle> = self
            .animations
            .iter_mut()
            .filter_map(|(handle, animator)| animator.advance(frame).then_some(handle))
            .collect();
        for handle in &finished {
            self.animations.remove(*handle);
        }
        if !finished.is_empty() {
            tracing::trace!(completed = finished.len(), remaining = self.animations.len(), "animations finished");
        }
        if self.animations.is_empty() {
            self.ticker = None;
        }
        finished.len()
    }

    /// Drop all animations and the ticker. Further registrations are
    /// refused. Calling this more than once is harmless.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.animations.clear();
        self.ticker = None;
        tracing::debug!("animation controller stopped");
    }

    /// Start the ticker if something is animating and none is running.
    fn ensure_ticker(&mut self) {
        if self.ticker.is_none() && !self.stopped && !self.animations.is_empty() {
            self.start_ticker();
        }
    }

    fn start_ticker(&mut self) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!(error = %Error::NoRuntime, "animation ticker not started");
                return;
            }
        };
        let (tx, rx) = mpsc::channel(1);
        let period = self.frame;
        let task = handle.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                let at = interval.tick().await;
                match tx.try_send(at.into_std()) {
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Closed(_)) => break,
                }
            }
        });
        tracing::trace!(?period, "animation ticker started");
        self.ticker = Some(Ticker { rx, task });
    }
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(60)
    }
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("animations", &self.animations.len())
            .field("frame", &self.frame)
            .field("ticking", &self.ticker.is_some())
            .field("stopped", &self.stopped)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, task};

    fn frames(n: u32) -> impl FnMut(Duration) -> bool + Send {
        let mut left = n;
        move |_| {
            left = left.saturating_sub(1);
            left == 0
        }
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn zero_fps_is_one() {
        let c = AnimationController::new(0);
        assert_eq!(c.frame_interval(), Duration::from_secs(1));
        assert_eq!(AnimationController::new(50).frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn without_runtime_registers_but_does_not_tick() {
        let mut c = AnimationController::new(60);
        let h = c.register(frames(2));
        assert!(h.is_some());
        assert!(!c.is_ticking());
        assert!(c.tick().is_none());
        assert_eq!(c.update(), 0);
        assert_eq!(c.update(), 1);
        assert!(c.is_empty());
    }

    #[test]
    fn ticker_starts_once_a_runtime_exists() {
        let mut c = AnimationController::new(60);
        c.register(frames(3));
        assert!(!c.is_ticking());

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        let tick = rt.block_on(c.next_tick());
        assert!(tick.is_some());
        assert!(c.is_ticking());
    }

    // ── Ticker lifecycle ─────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn ticker_runs_only_while_registered() {
        let mut c = AnimationController::new(60);
        assert!(c.tick().is_none());

        let h = c.register(frames(100)).unwrap();
        assert!(c.is_ticking());
        assert!(c.next_tick().await.is_some());

        assert!(c.unregister(h));
        assert!(!c.is_ticking());
        assert!(c.tick().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_stops_when_last_animation_completes() {
        let mut c = AnimationController::new(60);
        c.register(frames(1));
        c.register(frames(2));
        assert_eq!(c.update(), 1);
        assert!(c.is_ticking());
        assert_eq!(c.update(), 1);
        assert!(!c.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_next_tick_stays_pending() {
        let mut c = AnimationController::new(60);
        let mut fut = task::spawn(c.next_tick());
        assert_pending!(fut.poll());
        tokio::time::advance(Duration::from_secs(1)).await;
        assert_pending!(fut.poll());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_consumer_sees_one_tick() {
        let mut c = AnimationController::new(100);
        c.register(frames(1000));
        for _ in 0..10 {
            tokio::time::advance(Duration::from_millis(10)).await;
            tokio::task::yield_now().await;
        }
        let rx = c.tick().unwrap();
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    // ── Stop ─────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn stop_is_terminal_and_idempotent() {
        let mut c = AnimationController::new(60);
        c.register(frames(10));
        c.stop();
        c.stop();
        assert!(c.is_stopped());
        assert!(c.is_empty());
        assert!(!c.is_ticking());
        assert!(c.register(frames(1)).is_none());
    }
}
