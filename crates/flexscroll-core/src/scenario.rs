//! Scripted interaction replay
//!
//! A scenario is a TOML file with the component settings and a list of
//! steps (measurements, drags, releases, recenter requests, waits). The
//! runner drives a real [`FlexScroll`] on the current tokio runtime and
//! reports the state after every step.
//!
//! ```toml
//! viewport = { width = 400.0, height = 600.0 }
//!
//! [scroll]
//! start_in_middle = false
//!
//! [[step]]
//! action = "content"
//! width = 400.0
//! height = 1600.0
//!
//! [[step]]
//! action = "drag"
//! translation = -150.0
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AnimationConfig, PaginationConfig, ScrollConfig};
use crate::pagination::LoadCallback;
use crate::signal::MiddleSignal;
use crate::types::{Direction, Size};
use crate::view::FlexScroll;
use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Initial viewport size
    pub viewport: Size,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One scripted interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Viewport { width: f64, height: f64 },
    Content { width: f64, height: f64 },
    Drag { translation: f64 },
    Release { predicted: f64 },
    /// Set the go-to-middle signal and let the component observe it
    Middle,
    Recenter,
    Wait { ms: u64 },
}

/// State after a step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub step: Step,
    pub offset: f64,
    pub addition_offset: f64,
    pub half_extent: Option<f64>,
    pub loading: bool,
    /// Load dispatched by this step
    pub load: Option<Direction>,
}

impl Scenario {
    pub fn from_toml(content: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(Error::Scenario("no [[step]] entries".into()));
        }
        let Size { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(Error::Scenario(format!(
                "viewport must be non-negative, got {}x{}",
                width, height
            )));
        }
        Ok(())
    }
}

/// Drives a [`FlexScroll`] through a scenario
pub struct ScenarioRunner {
    scroll: FlexScroll,
    signal: MiddleSignal,
}

impl ScenarioRunner {
    /// Build the component on the current tokio runtime
    pub fn new(scenario: &Scenario, on_load: LoadCallback) -> Result<Self> {
        let signal = MiddleSignal::default();
        let mut scroll = FlexScroll::builder()
            .scroll_config(scenario.scroll.clone())
            .pagination_config(scenario.pagination.clone())
            .animation_config(scenario.animation.clone())
            .go_to_middle(signal.clone())
            .on_load(move |direction| on_load(direction))
            .build()?;
        scroll.on_viewport_measured(scenario.viewport);
        Ok(Self { scroll, signal })
    }

    pub fn scroll(&self) -> &FlexScroll {
        &self.scroll
    }

    pub async fn apply(&mut self, index: usize, step: &Step) -> StepReport {
        debug!(index, ?step, "Applying step");
        let load = match *step {
            Step::Viewport { width, height } => {
                self.scroll.on_viewport_measured(Size::new(width, height));
                None
            }
            Step::Content { width, height } => {
                self.scroll.on_content_measured(Size::new(width, height));
                None
            }
            Step::Drag { translation } => self.scroll.on_drag_changed(translation),
            Step::Release { predicted } => self.scroll.on_drag_ended(predicted).load,
            Step::Middle => {
                self.signal.request();
                self.scroll.poll_go_to_middle();
                None
            }
            Step::Recenter => {
                self.scroll.recenter();
                None
            }
            Step::Wait { ms } => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                None
            }
        };

        StepReport {
            index,
            step: step.clone(),
            offset: self.scroll.offset(),
            addition_offset: self.scroll.addition_offset(),
            half_extent: self.scroll.half_extent(),
            loading: self.scroll.is_loading(),
            load,
        }
    }

    /// Run every step in order
    pub async fn run(mut self, scenario: &Scenario) -> Vec<StepReport> {
        let mut reports = Vec::with_capacity(scenario.steps.len());
        for (index, step) in scenario.steps.iter().enumerate() {
            reports.push(self.apply(index, step).await);
        }
        reports
    }
}
