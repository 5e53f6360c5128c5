#![forbid(unsafe_code)]

//! Opacity fades for hover descriptions.
//!
//! Time is host-driven: nothing here reads a clock. The host calls
//! [`DescriptionFade::tick`] with the elapsed time since the previous frame.
//!
//! Two request kinds exist, matching how the bar uses them:
//!
//! - [`DescriptionFade::fade_in_now`] stops the running fade where it is,
//!   drops anything queued, and starts from the current opacity.
//! - [`DescriptionFade::fade_queued`] waits behind the running fade.

use std::collections::VecDeque;
use std::time::Duration;

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Cosine ease-in-out, the classic "swing" curve used by browser fades.
#[inline]
pub fn swing(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    0.5 - (t * std::f32::consts::PI).cos() / 2.0
}

/// One opacity transition from `from` to `to`.
#[derive(Debug, Clone, Copy)]
pub struct OpacityFade {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl OpacityFade {
    /// Create a fade with the given duration and default swing easing.
    ///
    /// A zero duration completes on the first tick.
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from: from.clamp(0.0, 1.0),
            to: to.clamp(0.0, 1.0),
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: swing,
        }
    }

    /// Set the easing function.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    #[must_use]
    pub fn raw_progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        let eased = (self.easing)(self.raw_progress());
        (self.from + (self.to - self.from) * eased).clamp(0.0, 1.0)
    }

    #[must_use]
    pub const fn target(&self) -> f32 {
        self.to
    }

    /// Time elapsed past completion, forwarded to the next queued fade.
    #[must_use]
    pub fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

/// Fade state for one hover description element.
#[derive(Debug, Clone)]
pub struct DescriptionFade {
    opacity: f32,
    duration: Duration,
    easing: EasingFn,
    active: Option<OpacityFade>,
    queued: VecDeque<f32>,
}

impl DescriptionFade {
    /// Create a hidden description whose fades last `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            opacity: 0.0,
            duration,
            easing: swing,
            active: None,
            queued: VecDeque::new(),
        }
    }

    /// Set the easing function used by subsequent fades.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Current opacity, in [0.0, 1.0].
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether a fade is running or queued.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some() || !self.queued.is_empty()
    }

    /// Number of fades waiting behind the running one.
    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    /// Jump to `opacity`, cancelling everything in flight.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.active = None;
        self.queued.clear();
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Stop the running fade where it is (no jump to its end), drop any
    /// queued fades, then fade from the current opacity to `target`.
    pub fn fade_in_now(&mut self, target: f32) {
        self.active = None;
        self.queued.clear();
        self.start(target);
    }

    /// Fade to `target` after every fade already running or queued. A
    /// target equal to the last pending one is dropped, so repeated requests
    /// never grow the queue.
    pub fn fade_queued(&mut self, target: f32) {
        if !self.is_animating() {
            self.start(target);
            return;
        }
        let pending = self
            .queued
            .back()
            .copied()
            .or_else(|| self.active.as_ref().map(OpacityFade::target));
        if pending != Some(target) {
            self.queued.push_back(target);
        }
    }

    /// Advance by `dt`. Returns whether the description is still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut remaining = dt;
        while let Some(fade) = self.active.as_mut() {
            fade.tick(remaining);
            self.opacity = fade.opacity();
            if !fade.is_complete() {
                break;
            }
            self.opacity = fade.target();
            remaining = fade.overshoot();
            self.active = None;
            if let Some(next) = self.queued.pop_front() {
                self.start(next);
            }
        }
        self.is_animating()
    }

    fn start(&mut self, target: f32) {
        self.active =
            Some(OpacityFade::new(self.opacity, target, self.duration).easing(self.easing));
    }
}
