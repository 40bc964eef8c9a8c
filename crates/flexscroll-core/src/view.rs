//! The scroll component
//!
//! [`FlexScroll`] is a plain state machine. The embedding layer feeds it
//! measurements and drag samples from its interaction thread and renders
//! [`FlexScroll::presented_offset`]:
//!
//! ```ignore
//! let mut scroll = FlexScroll::builder()
//!     .axis(Axis::Vertical)
//!     .on_load(|direction| println!("{direction} loaded"))
//!     .build()?;
//!
//! scroll.on_viewport_measured(Size::new(320.0, 600.0));
//! scroll.on_content_measured(Size::new(320.0, 1600.0));
//! scroll.on_drag_changed(-150.0);
//! scroll.on_drag_ended(-700.0);
//! ```

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::binding::Binding;
use crate::config::{AnimationConfig, AppConfig, PaginationConfig, ScrollConfig};
use crate::geometry::{Bounds, ContentGeometry, Measurement};
use crate::offset::OffsetController;
use crate::pagination::{
    LoadCallback, LoadDispatcher, PaginationTrigger, TokioDispatcher, TriggerSettings,
};
use crate::scroll::{OffsetAnimator, ScrollAnimator};
use crate::signal::{MiddleSignal, MiddleTrigger};
use crate::types::{Axis, Direction, LoadPolicy, Size};

/// Outcome of a drag release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// Offset the content settles at
    pub resting: f64,
    /// Load dispatched by a `BeforeReach` policy, if any
    pub load: Option<Direction>,
}

/// Scrollable content with elastic drag and bidirectional pagination
#[derive(Debug)]
pub struct FlexScroll {
    config: ScrollConfig,
    geometry: ContentGeometry,
    offset: OffsetController,
    pagination: PaginationTrigger,
    middle: Option<MiddleTrigger>,
}

impl FlexScroll {
    pub fn builder() -> FlexScrollBuilder {
        FlexScrollBuilder::default()
    }

    pub fn axis(&self) -> Axis {
        self.config.axis
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Model offset; 0 means the content is centered
    pub fn offset(&self) -> f64 {
        self.offset.offset()
    }

    /// Offset the next drag composes onto
    pub fn addition_offset(&self) -> f64 {
        self.offset.anchor()
    }

    pub fn half_extent(&self) -> Option<f64> {
        self.geometry.half_extent()
    }

    pub fn viewport_extent(&self) -> f64 {
        self.geometry.viewport_extent()
    }

    /// Clamp range for the resting offset
    pub fn bounds(&self) -> Bounds {
        self.geometry.bounds()
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.is_loading()
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_animating()
    }

    /// Offset to render at `now`
    pub fn presented_offset(&mut self, now: Instant) -> f64 {
        self.offset.presented(now)
    }

    pub fn on_viewport_measured(&mut self, size: Size) {
        self.geometry.measure_viewport(size);
    }

    /// Feed a content size, on mount and after every content change
    ///
    /// The viewport should be measured first: the initial start-edge bias
    /// depends on it.
    pub fn on_content_measured(&mut self, size: Size) -> Measurement {
        let measurement = self.geometry.measure_content(size);
        match measurement {
            Measurement::Skipped => {
                debug!(
                    width = size.width,
                    height = size.height,
                    "Ignoring empty content measurement"
                );
            }
            Measurement::Initial { half_extent } => {
                if !self.config.start_in_middle {
                    if let Some(edge) = self.geometry.start_edge_offset() {
                        self.offset.pin(edge);
                    }
                }
                debug!(half_extent, offset = self.offset(), "Content measured");
            }
            Measurement::Resized { half_extent, delta } => {
                if delta > 0.0 && self.config.go_back_before_load {
                    self.offset.shift(delta);
                }
                debug!(half_extent, delta, offset = self.offset(), "Content resized");
            }
        }
        measurement
    }

    /// Feed the translation of the active drag since it started
    pub fn on_drag_changed(&mut self, translation: f64) -> Option<Direction> {
        let offset = self.offset.drag_changed(translation);
        self.pagination.on_drag_changed(offset, self.geometry.half_extent())
    }

    /// Release the drag with the predicted end translation
    pub fn on_drag_ended(&mut self, predicted_translation: f64) -> Release {
        self.on_drag_ended_at(predicted_translation, Instant::now())
    }

    pub fn on_drag_ended_at(&mut self, predicted_translation: f64, now: Instant) -> Release {
        let resting = self.offset.drag_ended(predicted_translation, self.geometry.bounds(), now);
        let load = self.pagination.on_drag_ended(
            resting,
            self.geometry.half_extent(),
            self.geometry.viewport_extent(),
        );
        Release { resting, load }
    }

    /// Animate back to the middle of the content
    pub fn recenter(&mut self) {
        self.recenter_at(Instant::now());
    }

    pub fn recenter_at(&mut self, now: Instant) {
        debug!(from = self.offset(), "Recentering");
        self.offset.recenter(now);
    }

    /// Bind a signal whose false -> true transitions recenter the content
    pub fn middle(mut self, signal: MiddleSignal) -> Self {
        self.middle = Some(MiddleTrigger::new(signal));
        self
    }

    /// Observe the bound signal; returns whether a recenter started
    pub fn poll_go_to_middle(&mut self) -> bool {
        self.poll_go_to_middle_at(Instant::now())
    }

    pub fn poll_go_to_middle_at(&mut self, now: Instant) -> bool {
        let fired = self.middle.as_mut().is_some_and(MiddleTrigger::poll);
        if fired {
            self.recenter_at(now);
        }
        fired
    }
}

/// Construction options for [`FlexScroll`]
pub struct FlexScrollBuilder {
    scroll: ScrollConfig,
    pagination: PaginationConfig,
    animation: AnimationConfig,
    offset: Option<Binding>,
    addition_offset: Option<Binding>,
    go_to_middle: Option<MiddleSignal>,
    on_load: Option<LoadCallback>,
    dispatcher: Option<Arc<dyn LoadDispatcher>>,
    animator: Option<Box<dyn OffsetAnimator>>,
}

impl Default for FlexScrollBuilder {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            pagination: PaginationConfig::default(),
            animation: AnimationConfig::default(),
            offset: None,
            addition_offset: None,
            go_to_middle: None,
            on_load: None,
            dispatcher: None,
            animator: None,
        }
    }
}

impl FlexScrollBuilder {
    /// Take every section that applies to a component from the app configuration
    pub fn app_config(self, config: &AppConfig) -> Self {
        self.scroll_config(config.scroll.clone())
            .pagination_config(config.pagination.clone())
            .animation_config(config.animation.clone())
    }

    pub fn scroll_config(mut self, config: ScrollConfig) -> Self {
        self.scroll = config;
        self
    }

    pub fn pagination_config(mut self, config: PaginationConfig) -> Self {
        self.pagination = config;
        self
    }

    pub fn animation_config(mut self, config: AnimationConfig) -> Self {
        self.animation = config;
        self
    }

    pub fn axis(mut self, axis: Axis) -> Self {
        self.scroll.axis = axis;
        self
    }

    /// Delegate the offset to a parent-owned binding
    pub fn offset(mut self, binding: Binding) -> Self {
        self.offset = Some(binding);
        self
    }

    /// Delegate the drag anchor to a parent-owned binding
    pub fn addition_offset(mut self, binding: Binding) -> Self {
        self.addition_offset = Some(binding);
        self
    }

    pub fn start_in_middle(mut self, value: bool) -> Self {
        self.scroll.start_in_middle = value;
        self
    }

    pub fn go_back_before_load(mut self, value: bool) -> Self {
        self.scroll.go_back_before_load = value;
        self
    }

    pub fn go_to_middle(mut self, signal: MiddleSignal) -> Self {
        self.go_to_middle = Some(signal);
        self
    }

    pub fn on_load<F>(mut self, load: F) -> Self
    where
        F: Fn(Direction) + Send + Sync + 'static,
    {
        self.on_load = Some(Arc::new(load));
        self
    }

    pub fn load_policy_start(mut self, policy: LoadPolicy) -> Self {
        self.scroll.load_policy_start = policy;
        self
    }

    pub fn load_policy_end(mut self, policy: LoadPolicy) -> Self {
        self.scroll.load_policy_end = policy;
        self
    }

    /// Run loads and cooldowns somewhere other than the current tokio runtime
    pub fn dispatcher(mut self, dispatcher: Arc<dyn LoadDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn animator(mut self, animator: Box<dyn OffsetAnimator>) -> Self {
        self.animator = Some(animator);
        self
    }

    /// Build the component
    ///
    /// Without an explicit dispatcher this must run inside a tokio runtime.
    pub fn build(self) -> crate::Result<FlexScroll> {
        let dispatcher: Arc<dyn LoadDispatcher> = match self.dispatcher {
            Some(dispatcher) => dispatcher,
            None => Arc::new(TokioDispatcher::current()?),
        };
        let animator = self
            .animator
            .unwrap_or_else(|| Box::new(ScrollAnimator::new(self.animation.easing)));
        let on_load = self.on_load.unwrap_or_else(|| Arc::new(|_| {}));

        let settings = TriggerSettings {
            policy_start: self.scroll.load_policy_start,
            policy_end: self.scroll.load_policy_end,
            margin: self.pagination.margin(self.scroll.axis),
            cooldown: self.pagination.cooldown(),
            suppress_first_start_before_reach: self.scroll.suppress_first_start_before_reach
                && !self.scroll.start_in_middle,
        };

        Ok(FlexScroll {
            geometry: ContentGeometry::new(self.scroll.axis),
            offset: OffsetController::new(
                self.offset,
                self.addition_offset,
                animator,
                self.animation.release_duration(),
                self.animation.recenter_duration(),
            ),
            pagination: PaginationTrigger::new(settings, dispatcher, on_load),
            middle: self.go_to_middle.map(MiddleTrigger::new),
            config: self.scroll,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualDispatcher;
    use std::time::Duration;

    fn vertical(dispatcher: Arc<ManualDispatcher>) -> FlexScrollBuilder {
        FlexScroll::builder()
            .axis(Axis::Vertical)
            .start_in_middle(false)
            .dispatcher(dispatcher)
    }

    fn mounted(builder: FlexScrollBuilder) -> FlexScroll {
        let mut scroll = builder.build().unwrap();
        scroll.on_viewport_measured(Size::new(400.0, 600.0));
        scroll.on_content_measured(Size::new(400.0, 1600.0));
        scroll
    }

    #[test]
    fn test_mount_biases_to_start_edge() {
        let scroll = mounted(vertical(Arc::default()));
        assert_eq!(scroll.half_extent(), Some(800.0));
        assert_eq!(scroll.offset(), 500.0);
        assert_eq!(scroll.addition_offset(), 500.0);
    }

    #[test]
    fn test_start_in_middle_keeps_zero() {
        let scroll = mounted(vertical(Arc::default()).start_in_middle(true));
        assert_eq!(scroll.offset(), 0.0);
        assert_eq!(scroll.addition_offset(), 0.0);
    }

    #[test]
    fn test_drag_and_release_scenario() {
        let mut scroll = mounted(vertical(Arc::default()));

        scroll.on_drag_changed(-150.0);
        assert_eq!(scroll.offset(), 350.0);

        let bounds = scroll.bounds();
        assert_eq!((bounds.min, bounds.max), (-500.0, 500.0));

        // -1200 from the 500 anchor predicts a -700 resting offset
        let release = scroll.on_drag_ended_at(-1200.0, Instant::now());
        assert_eq!(release.resting, -500.0);
        assert_eq!(scroll.addition_offset(), -500.0);
    }

    #[test]
    fn test_anchor_composition() {
        let mut scroll = mounted(vertical(Arc::default()));
        let now = Instant::now();

        scroll.on_drag_changed(-100.0);
        let c1 = scroll.on_drag_ended_at(-100.0, now).resting;
        assert_eq!(c1, 400.0);

        scroll.on_drag_changed(-60.0);
        assert_eq!(scroll.offset(), -60.0 + c1);
    }

    #[test]
    fn test_growth_compensation() {
        let mut scroll = mounted(vertical(Arc::default()));
        scroll.on_content_measured(Size::new(400.0, 2100.0));
        assert_eq!(scroll.offset(), 750.0);
        assert_eq!(scroll.addition_offset(), 750.0);

        let mut fixed = mounted(vertical(Arc::default()).go_back_before_load(false));
        fixed.on_content_measured(Size::new(400.0, 2100.0));
        assert_eq!(fixed.offset(), 500.0);
        assert_eq!(fixed.addition_offset(), 500.0);
    }

    #[test]
    fn test_shrink_does_not_shift() {
        let mut scroll = mounted(vertical(Arc::default()));
        scroll.on_content_measured(Size::new(400.0, 1200.0));
        assert_eq!(scroll.offset(), 500.0);
        assert_eq!(scroll.half_extent(), Some(600.0));
    }

    #[test]
    fn test_empty_measurement_skipped() {
        let mut scroll = vertical(Arc::default()).build().unwrap();
        scroll.on_viewport_measured(Size::new(400.0, 600.0));
        assert_eq!(scroll.on_content_measured(Size::ZERO), Measurement::Skipped);
        assert_eq!(scroll.offset(), 0.0);
        assert_eq!(scroll.on_drag_changed(10_000.0), None);
    }

    #[test]
    fn test_under_tension_fires_once_per_episode() {
        let dispatcher = Arc::new(ManualDispatcher::default());
        let mut scroll = mounted(vertical(dispatcher.clone()));

        // anchor 500, start threshold 800 - 220 = 580
        assert_eq!(scroll.on_drag_changed(100.0), Some(Direction::Start));
        assert_eq!(scroll.on_drag_changed(200.0), None);
        assert_eq!(scroll.on_drag_changed(300.0), None);
        assert!(scroll.is_loading());

        scroll.on_drag_ended_at(300.0, Instant::now());
        assert_eq!(dispatcher.pending_clears(), 1);
        assert_eq!(dispatcher.loads(), vec![Direction::Start]);

        dispatcher.fire_clears();
        assert!(!scroll.is_loading());
    }

    #[test]
    fn test_before_reach_end_after_release() {
        let dispatcher = Arc::new(ManualDispatcher::default());
        let mut scroll = mounted(vertical(dispatcher.clone()));

        let release = scroll.on_drag_ended_at(-1200.0, Instant::now());
        assert_eq!(release.load, Some(Direction::End));
        assert!(!scroll.is_loading());
        assert_eq!(dispatcher.pending_clears(), 0);
    }

    #[test]
    fn test_go_to_middle_signal() {
        let signal = MiddleSignal::default();
        let mut scroll = mounted(vertical(Arc::default())).middle(signal.clone());
        let now = Instant::now();

        assert!(!scroll.poll_go_to_middle_at(now));
        signal.request();
        assert!(scroll.poll_go_to_middle_at(now));
        assert!(!signal.get());
        assert_eq!(scroll.offset(), 0.0);
        assert_eq!(scroll.addition_offset(), 0.0);
        assert!(scroll.is_animating());
        assert_eq!(scroll.presented_offset(now), 500.0);
        assert_eq!(scroll.presented_offset(now + Duration::from_millis(600)), 0.0);

        assert!(!scroll.poll_go_to_middle_at(now));
    }

    #[test]
    fn test_external_offset_binding() {
        let offset = Binding::new(0.0);
        let anchor = Binding::new(0.0);
        let mut scroll = mounted(
            vertical(Arc::default())
                .offset(offset.clone())
                .addition_offset(anchor.clone()),
        );

        assert_eq!(offset.get(), 500.0);
        scroll.on_drag_changed(-150.0);
        assert_eq!(offset.get(), 350.0);
        assert_eq!(anchor.get(), 500.0);
    }

    #[test]
    fn test_horizontal_uses_width_and_margin() {
        let dispatcher = Arc::new(ManualDispatcher::default());
        let mut scroll = FlexScroll::builder()
            .axis(Axis::Horizontal)
            .start_in_middle(true)
            .load_policy_end(LoadPolicy::UnderTension)
            .dispatcher(dispatcher.clone())
            .build()
            .unwrap();
        scroll.on_viewport_measured(Size::new(390.0, 844.0));
        scroll.on_content_measured(Size::new(2860.0, 260.0));
        assert_eq!(scroll.half_extent(), Some(1430.0));

        // end threshold -1430 + 90
        assert_eq!(scroll.on_drag_changed(-1339.0), None);
        assert_eq!(scroll.on_drag_changed(-1340.0), Some(Direction::End));
    }

    #[test]
    fn test_build_without_runtime_fails() {
        assert!(FlexScroll::builder().build().is_err());
    }
}
