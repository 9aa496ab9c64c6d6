use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{
    AxisLayout, AxisRequest, BucketRequest, BucketSet, CountAxis, GeometryMapper, ReviewItem,
    ScaleSelection, bucketize, generate_axis, select_scale,
};

use super::panel_layout::scale_axis_width;
use super::{PanelLayout, TimelineConfig};

/// Event that discards and rebuilds every bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebuildTrigger {
    Init,
    ItemsRefreshed,
    WindowChanged,
    Resized,
    SettingsChanged,
    HourlyTick,
}

impl RebuildTrigger {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::ItemsRefreshed => "items_refreshed",
            Self::WindowChanged => "window_changed",
            Self::Resized => "resized",
            Self::SettingsChanged => "settings_changed",
            Self::HourlyTick => "hourly_tick",
        }
    }
}

/// Derived state of one rebuild: scale, buckets, axes and geometry.
///
/// Built in one pass from the config, the item inventory and `now`; never
/// patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineModel {
    pub built_at: DateTime<Utc>,
    pub scale: ScaleSelection,
    pub buckets: BucketSet,
    pub axis: AxisLayout,
    pub count_axis: CountAxis,
    pub layout: PanelLayout,
    pub geometry: GeometryMapper,
}

impl TimelineModel {
    /// Runs scale selection, bucketing, count-axis sizing and label layout.
    ///
    /// `items` must already be sorted by due time.
    #[must_use]
    pub fn build(config: &TimelineConfig, items: &[ReviewItem], now: DateTime<Utc>) -> Self {
        let window_hours = config.window_hours();
        let scale = select_scale(
            &config.scale_tiers,
            window_hours,
            scale_axis_width(config.viewport),
            config.label_policy.min_px_per_label,
        );

        let buckets = bucketize(
            items,
            BucketRequest {
                now,
                timezone: config.timezone,
                bucket_hours: scale.bucket_hours(),
                window_hours,
            },
            &config.stats_policy(),
        );

        let count_axis = CountAxis::for_max_reviews(
            buckets.max_bucket_count(),
            config.max_bar_height,
            config.fixed_bar_height,
        );
        let layout = PanelLayout::new(config.viewport, count_axis);
        let geometry = GeometryMapper::for_buckets(&buckets, layout.plot_width(), layout.margin_left);

        let axis = generate_axis(
            &AxisRequest {
                anchor: buckets.anchor(),
                timezone: config.timezone,
                total_hours: buckets.total_hours(),
                tier: scale.tier,
                min_hours_per_label: scale.min_hours_per_label,
                time_format: config.time_format,
            },
            &config.label_policy,
        );

        Self {
            built_at: now,
            scale,
            buckets,
            axis,
            count_axis,
            layout,
            geometry,
        }
    }
}
