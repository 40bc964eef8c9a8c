use std::time::Instant;

use anyhow::Result;
use flexscroll_core::config::Growth;
use flexscroll_core::{AppConfig, Axis, Direction, FlexScroll, MiddleSignal, Size};
use tracing::{debug, info};

use crate::drag::DragTracker;
use crate::input::Action;
use crate::loader::PageLoader;
use crate::theme::Theme;

/// Points per terminal row
pub const ROW_POINTS: f64 = 20.0;
/// Points per terminal column
pub const COLUMN_POINTS: f64 = 10.0;

/// Size of one terminal cell along `axis`, in points
pub fn cell_points(axis: Axis) -> f64 {
    match axis {
        Axis::Vertical => ROW_POINTS,
        Axis::Horizontal => COLUMN_POINTS,
    }
}

/// Demo application state
///
/// The component works in points; the terminal grid is converted with
/// [`ROW_POINTS`] and [`COLUMN_POINTS`] so the default margins keep their
/// meaning.
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub scroll: FlexScroll,
    pub loader: PageLoader,
    pub middle: MiddleSignal,
    pub drag: DragTracker,

    /// Strip area in cells (columns, rows)
    pub viewport_cells: (u16, u16),
    /// Offset to draw this frame, in points
    pub presented: f64,
    pub last_load: Option<Direction>,
    pub status_message: Option<String>,
    pub should_quit: bool,

    measured_items: Option<usize>,
}

impl App {
    /// Build the demo on the current tokio runtime
    pub fn new(config: AppConfig, theme: Theme) -> Result<Self> {
        let loader = PageLoader::new(&config.demo);
        let middle = MiddleSignal::default();
        let sink = loader.clone();

        let mut builder = FlexScroll::builder()
            .app_config(&config)
            .go_to_middle(middle.clone())
            .on_load(move |direction| sink.load(direction));
        if config.demo.growth == Growth::Both {
            // Pages land on both sides, the middle stays put
            builder = builder.go_back_before_load(false);
        }
        let scroll = builder.build()?;

        Ok(Self {
            config,
            theme,
            scroll,
            loader,
            middle,
            drag: DragTracker::default(),
            viewport_cells: (0, 0),
            presented: 0.0,
            last_load: None,
            status_message: None,
            should_quit: false,
            measured_items: None,
        })
    }

    pub fn axis(&self) -> Axis {
        self.scroll.axis()
    }

    fn points(&self) -> f64 {
        cell_points(self.axis())
    }

    /// Content size in points for `count` items
    pub fn content_size(&self, count: usize) -> Size {
        let along = count as f64 * f64::from(self.config.demo.item_extent);
        let (columns, rows) = self.viewport_cells;
        match self.axis() {
            Axis::Vertical => Size::new(f64::from(columns) * COLUMN_POINTS, along * ROW_POINTS),
            Axis::Horizontal => Size::new(along * COLUMN_POINTS, f64::from(rows) * ROW_POINTS),
        }
    }

    /// Strip area changed
    pub fn resize(&mut self, columns: u16, rows: u16) {
        if self.viewport_cells == (columns, rows) {
            return;
        }
        self.viewport_cells = (columns, rows);
        self.scroll.on_viewport_measured(Size::new(
            f64::from(columns) * COLUMN_POINTS,
            f64::from(rows) * ROW_POINTS,
        ));
        debug!(columns, rows, "Viewport resized");
        self.sync_content();
    }

    /// Re-measure the content when the item count changed
    pub fn sync_content(&mut self) {
        if self.viewport_cells == (0, 0) {
            return;
        }
        let count = self.loader.len();
        if self.measured_items == Some(count) {
            return;
        }
        self.measured_items = Some(count);
        self.scroll.on_content_measured(self.content_size(count));
    }

    /// Per-frame update
    pub fn tick(&mut self, now: Instant) {
        self.sync_content();
        if self.scroll.poll_go_to_middle_at(now) {
            self.status_message = Some("Back to the middle".to_string());
        }
        self.presented = self.scroll.presented_offset(now);
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.scroll.is_animating() || self.drag.is_dragging()
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::GoToMiddle => self.middle.request(),
            Action::AppendPage => {
                let loader = self.loader.clone();
                tokio::task::spawn_blocking(move || loader.load(Direction::End));
                self.status_message = Some("Appending a page".to_string());
            }
            Action::DragStart(position) => {
                self.drag.start(f64::from(position) * self.points(), now);
                self.status_message = None;
            }
            Action::DragMove(position) => {
                let position = f64::from(position) * self.points();
                if let Some(translation) = self.drag.update(position, now) {
                    if let Some(direction) = self.scroll.on_drag_changed(translation) {
                        self.loaded(direction);
                    }
                }
            }
            Action::DragEnd => {
                if let Some(predicted) = self.drag.end(now) {
                    let release = self.scroll.on_drag_ended_at(predicted, now);
                    debug!(predicted, resting = release.resting, "Drag released");
                    if let Some(direction) = release.load {
                        self.loaded(direction);
                    }
                }
            }
            Action::None => {}
        }
    }

    fn loaded(&mut self, direction: Direction) {
        info!(%direction, "Load requested");
        self.last_load = Some(direction);
        self.status_message = Some(format!("Loading {}", direction));
    }
}
