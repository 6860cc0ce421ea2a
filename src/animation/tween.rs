//! Animation lifecycle and tweened values.
//!
//! [`Animation`] is a progress clock with an explicit state machine:
//!
//! ```text
//! Pending --start--> Running --advance--> Complete
//!                    |    ^                  ^
//!                 pause  resume              |
//!                    v    |                  |
//!                    Paused ------stop-------+
//! ```
//!
//! `stop` moves any state to `Complete` without firing the completion
//! callback. Reaching the end through `advance` fires it exactly once per
//! `start`/`reset` cycle.
//!
//! [`Tween`] maps an animation's eased progress onto a numeric range and
//! writes it into a [`Signal`], so widgets that read the signal rebuild
//! every frame while the tween runs.

use std::fmt;
use std::time::Duration;

use crate::reactive::Signal;

use super::controller::Animator;

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Maps linear progress `t` in [0, 1] to eased progress in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Constant velocity.
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

// ---------------------------------------------------------------------------
// AnimationState
// ---------------------------------------------------------------------------

/// Lifecycle state of an [`Animation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationState {
    Pending,
    Running,
    Paused,
    Complete,
}

// ---------------------------------------------------------------------------
// Animation
// ---------------------------------------------------------------------------

type CompletionFn = Box<dyn FnMut() + Send>;

/// A progress clock over a fixed duration.
pub struct Animation {
    state: AnimationState,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
    on_complete: Option<CompletionFn>,
    completion_fired: bool,
}

impl Animation {
    /// A pending animation lasting `duration`. A zero duration completes on
    /// the first advance.
    pub fn new(duration: Duration) -> Self {
        Self {
            state: AnimationState::Pending,
            elapsed: Duration::ZERO,
            duration,
            easing: linear,
            on_complete: None,
            completion_fired: false,
        }
    }

    /// Set the easing function (builder).
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Set the completion callback (builder).
    pub fn on_complete(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Start immediately (builder).
    pub fn started(mut self) -> Self {
        self.start();
        self
    }

    /// Current state.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Whether the animation has finished, by completion or by `stop`.
    pub fn is_complete(&self) -> bool {
        self.state == AnimationState::Complete
    }

    /// Linear progress in [0, 1].
    pub fn raw_progress(&self) -> f32 {
        if self.duration.is_zero() {
            return if self.elapsed.is_zero() && self.state != AnimationState::Complete {
                0.0
            } else {
                1.0
            };
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Eased progress in [0, 1].
    pub fn progress(&self) -> f32 {
        (self.easing)(self.raw_progress())
    }

    /// Pending → Running. Other states are left alone.
    pub fn start(&mut self) {
        if self.state == AnimationState::Pending {
            self.state = AnimationState::Running;
        }
    }

    /// Running → Paused.
    pub fn pause(&mut self) {
        if self.state == AnimationState::Running {
            self.state = AnimationState::Paused;
        }
    }

    /// Paused → Running.
    pub fn resume(&mut self) {
        if self.state == AnimationState::Paused {
            self.state = AnimationState::Running;
        }
    }

    /// Any state → Complete, without firing the completion callback.
    pub fn stop(&mut self) {
        self.state = AnimationState::Complete;
    }

    /// Back to Pending at zero progress, re-arming the completion callback.
    pub fn reset(&mut self) {
        self.state = AnimationState::Pending;
        self.elapsed = Duration::ZERO;
        self.completion_fired = false;
    }

    /// Advance a running animation by `dt`. Returns whether it is complete.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.state != AnimationState::Running {
            return self.is_complete();
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.state = AnimationState::Complete;
            if !self.completion_fired {
                self.completion_fired = true;
                if let Some(cb) = self.on_complete.as_mut() {
                    cb();
                }
            }
        }
        self.is_complete()
    }
}

impl Animator for Animation {
    fn advance(&mut self, dt: Duration) -> bool {
        Animation::advance(self, dt)
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("state", &self.state)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Interpolates `from → to` over an animation, publishing into a signal.
pub struct Tween {
    from: f64,
    to: f64,
    animation: Animation,
    target: Signal<f64>,
}

impl Tween {
    /// A running tween that writes into `target` on every advance.
    ///
    /// The signal is set to `from` immediately.
    pub fn new(target: Signal<f64>, from: f64, to: f64, duration: Duration) -> Self {
        target.set(from);
        Self { from, to, animation: Animation::new(duration).started(), target }
    }

    /// Set the easing function (builder).
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.animation = self.animation.easing(easing);
        self
    }

    /// Set the completion callback (builder).
    pub fn on_complete(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.animation = self.animation.on_complete(f);
        self
    }

    /// The interpolated value at the current progress.
    pub fn value(&self) -> f64 {
        let t = f64::from(self.animation.progress());
        self.from + (self.to - self.from) * t
    }

    /// The underlying lifecycle.
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Mutable access to the lifecycle (pause, resume, stop).
    pub fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }
}

impl Animator for Tween {
    fn advance(&mut self, dt: Duration) -> bool {
        let done = self.animation.advance(dt);
        self.target.set(self.value());
        done
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("animation", &self.animation)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
