//! Animation controller for the presented scroll offset

use std::time::{Duration, Instant};

use super::timing::{is_complete, lerp, progress};
use crate::config::EasingType;

/// "Animate to value" capability consumed by the scroll component
///
/// The component owns the model offset; an animator only decides what is
/// presented while the model jumped to a new resting value.
pub trait OffsetAnimator: Send {
    /// Start animating from `from` to `to`, replacing any running animation
    fn animate(&mut self, from: f64, to: f64, duration: Duration, now: Instant);

    /// Sample the presented value, or `None` once no animation is running
    fn value_at(&mut self, now: Instant) -> Option<f64>;

    /// Translate a running animation, used when content growth shifts the offset
    fn shift_by(&mut self, delta: f64);

    /// Stop any running animation
    fn cancel(&mut self);

    fn is_animating(&self) -> bool;
}

/// Active animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
}

/// Eased offset animator
///
/// Call `animate()` to begin an animation, then sample it each frame through
/// `value_at()`.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    easing: EasingType,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(EasingType::default())
    }
}

impl ScrollAnimator {
    pub fn new(easing: EasingType) -> Self {
        Self {
            animation: None,
            easing,
        }
    }

    /// Target of the running animation
    pub fn target(&self) -> Option<f64> {
        self.animation.as_ref().map(|a| a.to)
    }
}

impl OffsetAnimator for ScrollAnimator {
    fn animate(&mut self, from: f64, to: f64, duration: Duration, now: Instant) {
        // Instant jump for zero duration or when already there
        if duration.is_zero() || (from - to).abs() < f64::EPSILON {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to,
            duration,
        });
    }

    fn value_at(&mut self, now: Instant) -> Option<f64> {
        let anim = self.animation.as_ref()?;

        if is_complete(anim.start, anim.duration, now) {
            self.animation = None;
            return None;
        }

        let t = progress(anim.start, anim.duration, now);
        Some(lerp(anim.from, anim.to, self.easing.apply(t)))
    }

    fn shift_by(&mut self, delta: f64) {
        if let Some(anim) = self.animation.as_mut() {
            anim.from += delta;
            anim.to += delta;
        }
    }

    fn cancel(&mut self) {
        self.animation = None;
    }

    #[inline]
    fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}
