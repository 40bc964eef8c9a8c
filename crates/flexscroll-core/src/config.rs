use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::types::{Axis, LoadPolicy};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (demo log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Behaviour of a single scroll component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Scroll axis
    #[serde(default)]
    pub axis: Axis,
    /// Keep the content centered on first measurement instead of showing the start edge
    #[serde(default)]
    pub start_in_middle: bool,
    /// Shift the resting offset by the growth of the half-extent after a load
    #[serde(default = "default_true")]
    pub go_back_before_load: bool,
    /// Load policy for the start (left/top) edge
    #[serde(default = "default_policy_start")]
    pub load_policy_start: LoadPolicy,
    /// Load policy for the end (right/bottom) edge
    #[serde(default = "default_policy_end")]
    pub load_policy_end: LoadPolicy,
    /// Skip the first `BeforeReach` evaluation of the start edge when the
    /// content does not start in the middle
    #[serde(default)]
    pub suppress_first_start_before_reach: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            axis: Axis::default(),
            start_in_middle: false,
            go_back_before_load: default_true(),
            load_policy_start: default_policy_start(),
            load_policy_end: default_policy_end(),
            suppress_first_start_before_reach: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Inner margin from the content edge for `UnderTension` on the horizontal axis
    #[serde(default = "default_horizontal_margin")]
    pub horizontal_margin: f64,
    /// Inner margin from the content edge for `UnderTension` on the vertical axis
    #[serde(default = "default_vertical_margin")]
    pub vertical_margin: f64,
    /// Delay after drag release before a loading episode is cleared
    #[serde(default = "default_cooldown")]
    pub cooldown_ms: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            horizontal_margin: default_horizontal_margin(),
            vertical_margin: default_vertical_margin(),
            cooldown_ms: default_cooldown(),
        }
    }
}

impl PaginationConfig {
    pub fn margin(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal_margin,
            Axis::Vertical => self.vertical_margin,
        }
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// Easing curve used when settling the offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the target at the end of the duration
    None,
    Linear,
    /// Cubic ease-out
    #[default]
    Cubic,
    /// Quintic ease-out
    Quintic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Settle animation after drag release
    #[serde(default = "default_release_duration")]
    pub release_duration_ms: u64,
    /// Animation back to the middle
    #[serde(default = "default_recenter_duration")]
    pub recenter_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            release_duration_ms: default_release_duration(),
            recenter_duration_ms: default_recenter_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

impl AnimationConfig {
    pub fn release_duration(&self) -> Duration {
        Duration::from_millis(self.release_duration_ms)
    }

    pub fn recenter_duration(&self) -> Duration {
        Duration::from_millis(self.recenter_duration_ms)
    }

    pub fn tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }
}

/// Where the demo puts freshly loaded items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Growth {
    /// Append a page at the end for either direction
    #[default]
    End,
    /// Prepend and append a page at once
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_initial_items")]
    pub initial_items: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Cell size along the axis, in terminal cells
    #[serde(default = "default_item_extent")]
    pub item_extent: u16,
    #[serde(default)]
    pub growth: Growth,
    /// Simulated latency of a load, in milliseconds
    #[serde(default = "default_load_latency")]
    pub load_latency_ms: u64,
    /// Tick rate in milliseconds when idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            initial_items: default_initial_items(),
            page_size: default_page_size(),
            item_extent: default_item_extent(),
            growth: Growth::default(),
            load_latency_ms: default_load_latency(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flexscroll")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_policy_start() -> LoadPolicy {
    LoadPolicy::UnderTension
}

fn default_policy_end() -> LoadPolicy {
    LoadPolicy::BeforeReach
}

fn default_horizontal_margin() -> f64 {
    90.0
}

fn default_vertical_margin() -> f64 {
    220.0
}

fn default_cooldown() -> u64 {
    500
}

fn default_release_duration() -> u64 {
    800
}

fn default_recenter_duration() -> u64 {
    600
}

fn default_animation_fps() -> u32 {
    60
}

fn default_initial_items() -> usize {
    15
}

fn default_page_size() -> usize {
    10
}

fn default_item_extent() -> u16 {
    5
}

fn default_load_latency() -> u64 {
    150
}

fn default_tick_rate() -> u64 {
    100
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults when it is missing
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> crate::Result<()> {
        let margins = [
            ("pagination.horizontal_margin", self.pagination.horizontal_margin),
            ("pagination.vertical_margin", self.pagination.vertical_margin),
        ];
        for (name, value) in margins {
            if !value.is_finite() || value < 0.0 {
                return Err(crate::Error::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.demo.item_extent == 0 {
            return Err(crate::Error::Config("demo.item_extent must be at least 1".into()));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/flexscroll/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("flexscroll")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used by the terminal demo
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("flexscroll.log")
    }
}
