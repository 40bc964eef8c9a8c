//! Live offset and drag anchor
//!
//! The anchor is the offset a drag composes onto: a drag sets
//! `offset = translation + anchor`, and a release moves both to the clamped
//! resting value. Consecutive drags therefore continue from where the last
//! one settled instead of restarting from zero.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::binding::{self, Binding, OffsetCell};
use crate::geometry::Bounds;
use crate::scroll::OffsetAnimator;

pub struct OffsetController {
    offset: Box<dyn OffsetCell>,
    anchor: Box<dyn OffsetCell>,
    animator: Box<dyn OffsetAnimator>,
    release_duration: Duration,
    recenter_duration: Duration,
}

impl std::fmt::Debug for OffsetController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OffsetController")
            .field("offset", &self.offset.get())
            .field("anchor", &self.anchor.get())
            .field("animating", &self.animator.is_animating())
            .finish()
    }
}

impl OffsetController {
    /// Create a controller; each binding, when supplied, owns its value for
    /// the controller's whole lifetime
    pub fn new(
        offset: Option<Binding>,
        anchor: Option<Binding>,
        animator: Box<dyn OffsetAnimator>,
        release_duration: Duration,
        recenter_duration: Duration,
    ) -> Self {
        Self {
            offset: binding::resolve(offset),
            anchor: binding::resolve(anchor),
            animator,
            release_duration,
            recenter_duration,
        }
    }

    /// Model offset (the resting target while an animation runs)
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset.get()
    }

    #[inline]
    pub fn anchor(&self) -> f64 {
        self.anchor.get()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Value to render at `now`
    pub fn presented(&mut self, now: Instant) -> f64 {
        match self.animator.value_at(now) {
            Some(value) => value,
            None => self.offset.get(),
        }
    }

    /// Follow the finger; the live offset is not clamped
    pub fn drag_changed(&mut self, translation: f64) -> f64 {
        self.animator.cancel();
        let offset = translation + self.anchor.get();
        self.offset.set(offset);
        offset
    }

    /// Settle at the predicted end position clamped to `bounds`
    ///
    /// The anchor takes the resting value right away so that a drag started
    /// mid-animation composes onto the target, not the presented value.
    pub fn drag_ended(&mut self, predicted_translation: f64, bounds: Bounds, now: Instant) -> f64 {
        let predicted = predicted_translation + self.anchor.get();
        let resting = bounds.clamp(predicted);
        let from = self.presented(now);

        self.animator.animate(from, resting, self.release_duration, now);
        self.offset.set(resting);
        self.anchor.set(resting);

        debug!(predicted, resting, "Drag released");
        resting
    }

    /// Animate back to the middle of the content
    pub fn recenter(&mut self, now: Instant) {
        let from = self.presented(now);
        self.animator.animate(from, 0.0, self.recenter_duration, now);
        self.offset.set(0.0);
        self.anchor.set(0.0);
    }

    /// Move offset and anchor to `value` without animating
    pub fn pin(&mut self, value: f64) {
        self.animator.cancel();
        self.offset.set(value);
        self.anchor.set(value);
    }

    /// Translate offset, anchor and any running animation by `delta`
    pub fn shift(&mut self, delta: f64) {
        self.offset.add(delta);
        self.anchor.add(delta);
        self.animator.shift_by(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EasingType;
    use crate::scroll::ScrollAnimator;

    fn controller(offset: Option<Binding>, anchor: Option<Binding>) -> OffsetController {
        OffsetController::new(
            offset,
            anchor,
            Box::new(ScrollAnimator::new(EasingType::Linear)),
            Duration::from_millis(800),
            Duration::from_millis(600),
        )
    }

    #[test]
    fn test_drag_composes_on_anchor() {
        let mut ctrl = controller(None, None);
        ctrl.pin(500.0);
        assert_eq!(ctrl.drag_changed(-150.0), 350.0);
        assert_eq!(ctrl.anchor(), 500.0);
    }

    #[test]
    fn test_release_clamps_and_moves_anchor() {
        let mut ctrl = controller(None, None);
        let bounds = Bounds::new(800.0, 600.0);
        ctrl.pin(500.0);
        ctrl.drag_changed(-650.0);

        let now = Instant::now();
        let resting = ctrl.drag_ended(-1200.0, bounds, now);
        assert_eq!(resting, -500.0);
        assert_eq!(ctrl.offset(), -500.0);
        assert_eq!(ctrl.anchor(), -500.0);
        assert!(ctrl.is_animating());
        // Animation starts from where the finger left the content
        assert_eq!(ctrl.presented(now), -150.0);
    }

    #[test]
    fn test_second_drag_uses_clamped_anchor() {
        let mut ctrl = controller(None, None);
        let bounds = Bounds::new(800.0, 600.0);
        let now = Instant::now();

        ctrl.drag_changed(900.0);
        let c1 = ctrl.drag_ended(1000.0, bounds, now);
        assert_eq!(c1, 500.0);

        // Mid-animation drag composes onto the resting target
        assert_eq!(ctrl.drag_changed(-40.0), -40.0 + c1);
        assert!(!ctrl.is_animating());
    }

    #[test]
    fn test_recenter_resets_anchor_immediately() {
        let mut ctrl = controller(None, None);
        let now = Instant::now();
        ctrl.pin(320.0);
        ctrl.recenter(now);

        assert_eq!(ctrl.anchor(), 0.0);
        assert_eq!(ctrl.offset(), 0.0);
        assert_eq!(ctrl.presented(now), 320.0);
        assert_eq!(ctrl.presented(now + Duration::from_millis(600)), 0.0);
    }

    #[test]
    fn test_external_bindings_own_values() {
        let offset = Binding::new(0.0);
        let anchor = Binding::new(0.0);
        let mut ctrl = controller(Some(offset.clone()), Some(anchor.clone()));

        ctrl.pin(100.0);
        ctrl.shift(25.0);
        assert_eq!(offset.get(), 125.0);
        assert_eq!(anchor.get(), 125.0);

        // Parent moves the offset directly
        offset.set(-40.0);
        assert_eq!(ctrl.offset(), -40.0);
        assert_eq!(ctrl.presented(Instant::now()), -40.0);
    }

    #[test]
    fn test_independent_owner_resolution() {
        let anchor = Binding::new(0.0);
        let mut ctrl = controller(None, Some(anchor.clone()));
        ctrl.pin(10.0);
        ctrl.drag_changed(5.0);
        assert_eq!(ctrl.offset(), 15.0);
        assert_eq!(anchor.get(), 10.0);
    }
}
