use serde::{Deserialize, Serialize};

use crate::core::{
    DEFAULT_SCALE_TIERS, LabelCollisionPolicy, MarkerCategories, ScaleTier, SrsDisplayMode,
    StatsPolicy, TimeFormat, ViewerTimeZone, Viewport,
};
use crate::error::TimelineResult;

use super::validation::validate_timeline_config;

pub const DEFAULT_WINDOW_DAYS: f64 = 3.5;
pub const DEFAULT_MAX_DAYS: u32 = 14;
pub const MAX_WINDOW_DAYS_CEILING: u32 = 125;
/// Shortest window, one quarter hour expressed in days.
pub const MIN_WINDOW_DAYS: f64 = 0.25 / 24.0;
pub const DEFAULT_MAX_BAR_WIDTH_PX: u32 = 40;
pub const DEFAULT_PANEL_WIDTH_PX: u32 = 760;
pub const DEFAULT_PANEL_HEIGHT_PX: u32 = 100;

/// How each bar is split into stacked segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarStyle {
    Count,
    #[default]
    ItemType,
    SrsStage,
    Level,
}

/// Amount of detail in the range summary; `None` disables highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDetailsMode {
    None,
    Summary,
    ItemList,
    /// Item list plus per-item meanings and readings, which the host looks up
    /// by item id when `RangeSummary::wants_item_details` is set.
    #[default]
    Full,
}

impl ReviewDetailsMode {
    #[must_use]
    pub fn allows_highlight(self) -> bool {
        self != Self::None
    }

    #[must_use]
    pub fn includes_item_list(self) -> bool {
        matches!(self, Self::ItemList | Self::Full)
    }

    #[must_use]
    pub fn includes_item_details(self) -> bool {
        self == Self::Full
    }
}

/// Public timeline bootstrap configuration.
///
/// Serializable so hosts can persist their settings store as-is. Missing
/// fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default = "default_days")]
    pub days: f64,
    #[serde(default = "default_max_days")]
    pub max_days: u32,
    #[serde(default = "default_max_bar_width")]
    pub max_bar_width: Option<u32>,
    #[serde(default)]
    pub max_bar_height: Option<u32>,
    #[serde(default)]
    pub fixed_bar_height: bool,
    #[serde(default)]
    pub bar_style: BarStyle,
    #[serde(default)]
    pub srs_display: SrsDisplayMode,
    #[serde(default)]
    pub current_level_markers: MarkerCategories,
    #[serde(default = "default_burn_markers")]
    pub burn_markers: bool,
    #[serde(default)]
    pub review_details: ReviewDetailsMode,
    #[serde(default)]
    pub time_format: TimeFormat,
    #[serde(default)]
    pub timezone: ViewerTimeZone,
    #[serde(default = "default_user_level")]
    pub user_level: u32,
    #[serde(default)]
    pub label_policy: LabelCollisionPolicy,
    #[serde(default = "default_scale_tiers")]
    pub scale_tiers: Vec<ScaleTier>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self::new(default_viewport())
    }
}

impl TimelineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            days: default_days(),
            max_days: default_max_days(),
            max_bar_width: default_max_bar_width(),
            max_bar_height: None,
            fixed_bar_height: false,
            bar_style: BarStyle::default(),
            srs_display: SrsDisplayMode::default(),
            current_level_markers: MarkerCategories::default(),
            burn_markers: default_burn_markers(),
            review_details: ReviewDetailsMode::default(),
            time_format: TimeFormat::default(),
            timezone: ViewerTimeZone::default(),
            user_level: default_user_level(),
            label_policy: LabelCollisionPolicy::default(),
            scale_tiers: default_scale_tiers(),
        }
    }

    #[must_use]
    pub fn with_days(mut self, days: f64) -> Self {
        self.days = days;
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: ViewerTimeZone) -> Self {
        self.timezone = timezone;
        self
    }

    #[must_use]
    pub fn with_user_level(mut self, user_level: u32) -> Self {
        self.user_level = user_level;
        self
    }

    #[must_use]
    pub fn with_bar_style(mut self, bar_style: BarStyle) -> Self {
        self.bar_style = bar_style;
        self
    }

    #[must_use]
    pub fn with_review_details(mut self, review_details: ReviewDetailsMode) -> Self {
        self.review_details = review_details;
        self
    }

    #[must_use]
    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    #[must_use]
    pub fn with_srs_display(mut self, srs_display: SrsDisplayMode) -> Self {
        self.srs_display = srs_display;
        self
    }

    #[must_use]
    pub fn with_max_bar_height(mut self, cap: Option<u32>, fixed: bool) -> Self {
        self.max_bar_height = cap;
        self.fixed_bar_height = fixed;
        self
    }

    /// Checks every field and returns the normalized config.
    ///
    /// `days` above `max_days` is clamped down; everything else out of range
    /// is rejected.
    pub fn validate(self) -> TimelineResult<Self> {
        validate_timeline_config(self)
    }

    /// Requested window length in whole hours.
    #[must_use]
    pub fn window_hours(&self) -> u32 {
        window_hours_for_days(self.days)
    }

    #[must_use]
    pub fn stats_policy(&self) -> StatsPolicy {
        StatsPolicy {
            srs_display: self.srs_display,
            user_level: self.user_level,
            marker_categories: self.current_level_markers,
        }
    }
}

/// Rounds a fractional day count to whole hours, never below one.
#[must_use]
pub fn window_hours_for_days(days: f64) -> u32 {
    if !days.is_finite() || days <= 0.0 {
        return 1;
    }
    ((days * 24.0).round() as u32).max(1)
}

fn default_viewport() -> Viewport {
    Viewport::new(DEFAULT_PANEL_WIDTH_PX, DEFAULT_PANEL_HEIGHT_PX)
}

fn default_days() -> f64 {
    DEFAULT_WINDOW_DAYS
}

fn default_max_days() -> u32 {
    DEFAULT_MAX_DAYS
}

fn default_max_bar_width() -> Option<u32> {
    Some(DEFAULT_MAX_BAR_WIDTH_PX)
}

fn default_burn_markers() -> bool {
    true
}

fn default_user_level() -> u32 {
    1
}

fn default_scale_tiers() -> Vec<ScaleTier> {
    DEFAULT_SCALE_TIERS.to_vec()
}
