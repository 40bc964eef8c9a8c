use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::dispatcher::{LoadCallback, LoadDispatcher, LoadingFlag};
use crate::types::{Direction, LoadPolicy};

/// Static settings of a trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerSettings {
    pub policy_start: LoadPolicy,
    pub policy_end: LoadPolicy,
    /// Inner margin from the content edge for `UnderTension`
    pub margin: f64,
    pub cooldown: Duration,
    /// Skip the first release that would fire a start-edge `BeforeReach` load
    pub suppress_first_start_before_reach: bool,
}

/// Decides when the load callback runs
///
/// While an `UnderTension` episode is loading nothing fires, in either
/// direction. The episode ends a cooldown after the drag that started it is
/// released. `BeforeReach` loads fire only on release and never mark an
/// episode.
pub struct PaginationTrigger {
    settings: TriggerSettings,
    loading: LoadingFlag,
    dispatcher: Arc<dyn LoadDispatcher>,
    on_load: LoadCallback,
    first_release_pending: bool,
}

impl std::fmt::Debug for PaginationTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationTrigger")
            .field("settings", &self.settings)
            .field("loading", &self.loading.is_loading())
            .finish()
    }
}

impl PaginationTrigger {
    pub fn new(
        settings: TriggerSettings,
        dispatcher: Arc<dyn LoadDispatcher>,
        on_load: LoadCallback,
    ) -> Self {
        Self {
            first_release_pending: settings.suppress_first_start_before_reach,
            settings,
            loading: LoadingFlag::new(),
            dispatcher,
            on_load,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    fn policy(&self, direction: Direction) -> LoadPolicy {
        match direction {
            Direction::Start => self.settings.policy_start,
            Direction::End => self.settings.policy_end,
        }
    }

    /// Evaluate the live offset during a drag
    ///
    /// `half_extent` is `None` while no content has been measured.
    pub fn on_drag_changed(&mut self, offset: f64, half_extent: Option<f64>) -> Option<Direction> {
        if self.loading.is_loading() {
            return None;
        }
        let half = half_extent?;
        let margin = self.settings.margin;

        let direction = if offset >= half - margin
            && self.policy(Direction::Start) == LoadPolicy::UnderTension
        {
            Direction::Start
        } else if offset <= -half + margin
            && self.policy(Direction::End) == LoadPolicy::UnderTension
        {
            Direction::End
        } else {
            return None;
        };

        let episode = self.loading.begin();
        info!(%direction, episode, offset, "Loading under tension");
        self.dispatcher.dispatch(direction, Arc::clone(&self.on_load));
        Some(direction)
    }

    /// Evaluate the resting offset after a release
    ///
    /// Also schedules the end of a running episode after the cooldown.
    pub fn on_drag_ended(
        &mut self,
        resting: f64,
        half_extent: Option<f64>,
        viewport_extent: f64,
    ) -> Option<Direction> {
        if self.loading.is_loading() {
            let episode = self.loading.episode();
            let cooldown_ms = self.settings.cooldown.as_millis() as u64;
            debug!(episode, cooldown_ms, "Scheduling load cooldown");
            self.dispatcher
                .clear_after(self.loading.clone(), episode, self.settings.cooldown);
            return None;
        }

        let half = half_extent?;

        let direction = if resting < -half + viewport_extent
            && self.policy(Direction::End) == LoadPolicy::BeforeReach
        {
            Direction::End
        } else if resting > half - viewport_extent
            && self.policy(Direction::Start) == LoadPolicy::BeforeReach
        {
            if std::mem::take(&mut self.first_release_pending) {
                debug!("First start-edge check suppressed");
                return None;
            }
            Direction::Start
        } else {
            return None;
        };

        info!(%direction, resting, "Loading before reach");
        self.dispatcher.dispatch(direction, Arc::clone(&self.on_load));
        Some(direction)
    }
}
