//! Drag gesture tracking
//!
//! Turns pointer positions along the scroll axis into a running
//! translation and, on release, a predicted end translation that carries
//! the release velocity forward.

use std::time::{Duration, Instant};

/// How far the release velocity is projected
const PROJECTION: Duration = Duration::from_millis(200);

/// Samples older than this do not contribute to the release velocity
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    origin: Option<f64>,
    translation: f64,
    last_sample: Option<(f64, Instant)>,
    velocity: f64,
}

impl DragTracker {
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    /// Begin a drag at `position`
    pub fn start(&mut self, position: f64, now: Instant) {
        self.origin = Some(position);
        self.translation = 0.0;
        self.last_sample = Some((position, now));
        self.velocity = 0.0;
    }

    /// Move the pointer; returns the translation since the drag began
    pub fn update(&mut self, position: f64, now: Instant) -> Option<f64> {
        let origin = self.origin?;
        if let Some((last, at)) = self.last_sample {
            let elapsed = now.saturating_duration_since(at).as_secs_f64();
            if elapsed > 0.0 {
                self.velocity = (position - last) / elapsed;
            }
        }
        self.last_sample = Some((position, now));
        self.translation = position - origin;
        Some(self.translation)
    }

    /// Release; returns the predicted end translation
    pub fn end(&mut self, now: Instant) -> Option<f64> {
        self.origin?;
        let velocity = match self.last_sample {
            Some((_, at)) if now.saturating_duration_since(at) <= VELOCITY_WINDOW => self.velocity,
            _ => 0.0,
        };
        let predicted = self.translation + velocity * PROJECTION.as_secs_f64();
        *self = Self::default();
        Some(predicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_dragging() {
        let mut tracker = DragTracker::default();
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.update(10.0, Instant::now()), None);
        assert_eq!(tracker.end(Instant::now()), None);
    }

    #[test]
    fn test_translation_is_relative_to_origin() {
        let now = Instant::now();
        let mut tracker = DragTracker::default();
        tracker.start(20.0, now);
        assert_eq!(tracker.update(14.0, now + Duration::from_millis(10)), Some(-6.0));
        assert_eq!(tracker.update(25.0, now + Duration::from_millis(20)), Some(5.0));
    }

    #[test]
    fn test_release_projects_velocity() {
        let now = Instant::now();
        let mut tracker = DragTracker::default();
        tracker.start(20.0, now);
        // 10 cells in 100ms: 100 cells per second
        tracker.update(10.0, now + Duration::from_millis(100));
        let predicted = tracker.end(now + Duration::from_millis(100)).unwrap();
        assert!((predicted - (-10.0 - 20.0)).abs() < 1e-9);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_stale_release_has_no_momentum() {
        let now = Instant::now();
        let mut tracker = DragTracker::default();
        tracker.start(20.0, now);
        tracker.update(10.0, now + Duration::from_millis(50));
        let predicted = tracker.end(now + Duration::from_millis(500)).unwrap();
        assert_eq!(predicted, -10.0);
    }
}
