use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::labels::TimeFormat;
use crate::core::primitives::hours_after;
use crate::core::scale_tier::{DEFAULT_MIN_PX_PER_LABEL, ScaleTier};
use crate::core::types::ViewerTimeZone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicKind {
    /// Emphasized boundary (day, week or month).
    Red,
    Major,
    Minor,
}

/// Vertical grid line at an hour tic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTic {
    pub hour: u32,
    /// Hour offset after the sub-hour timezone shift.
    pub position_hours: f64,
    pub kind: TicKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub hour: u32,
    pub position_hours: f64,
    pub kind: TicKind,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub grid: Vec<GridTic>,
    pub labels: Vec<AxisLabel>,
}

/// Label density and overlap rules for the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelCollisionPolicy {
    pub min_px_per_label: f64,
    /// Fraction of `min_hours_per_label` two labels must be apart.
    pub spacing_factor: f64,
    /// Drop a long-form major label that sits too close before a red label.
    pub retract_major_before_red: bool,
}

impl Default for LabelCollisionPolicy {
    fn default() -> Self {
        Self {
            min_px_per_label: DEFAULT_MIN_PX_PER_LABEL,
            spacing_factor: 0.58,
            retract_major_before_red: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRequest {
    pub anchor: DateTime<Utc>,
    pub timezone: ViewerTimeZone,
    pub total_hours: u32,
    pub tier: ScaleTier,
    pub min_hours_per_label: f64,
    pub time_format: TimeFormat,
}

/// Walks every hour of the window and emits grid tics and labels.
///
/// Red overrides major, major overrides minor. Only red and major tics carry
/// labels, and no grid line is emitted at the origin.
#[must_use]
pub fn generate_axis(request: &AxisRequest, policy: &LabelCollisionPolicy) -> AxisLayout {
    let (red, major, minor) = request.tier.tic_specs(request.time_format);
    let min_gap = request.min_hours_per_label * policy.spacing_factor;

    let mut layout = AxisLayout::default();
    let mut prev_label: Option<u32> = None;
    let gap_since_prev = |prev: Option<u32>, hour: u32| prev.map(|p| f64::from(hour - p));

    for hour in 0..request.total_hours {
        let instant = hours_after(request.anchor, i64::from(hour));
        let local = request.timezone.to_local(instant);
        let position_hours = f64::from(hour) - request.timezone.hour_shift_hours(instant);
        let push_grid = |kind: TicKind, grid: &mut Vec<GridTic>| {
            if hour > 0 {
                grid.push(GridTic {
                    hour,
                    position_hours,
                    kind,
                });
            }
        };

        if let Some(text) = red.label(local, hour, request.time_format) {
            push_grid(TicKind::Red, &mut layout.grid);
            let too_close = gap_since_prev(prev_label, hour).is_some_and(|gap| gap < min_gap);
            let last_is_major = layout
                .labels
                .last()
                .is_some_and(|label| label.kind == TicKind::Major);
            if policy.retract_major_before_red && !major.short_form && too_close && last_is_major {
                layout.labels.pop();
            }
            layout.labels.push(AxisLabel {
                hour,
                position_hours,
                kind: TicKind::Red,
                text,
            });
            prev_label = Some(hour);
        } else if let Some(text) = major.label(local, hour, request.time_format) {
            push_grid(TicKind::Major, &mut layout.grid);
            let clear = gap_since_prev(prev_label, hour).is_none_or(|gap| gap > min_gap);
            if major.short_form || clear {
                layout.labels.push(AxisLabel {
                    hour,
                    position_hours,
                    kind: TicKind::Major,
                    text,
                });
                prev_label = Some(hour);
            }
        } else if minor.label(local, hour, request.time_format).is_some() {
            push_grid(TicKind::Minor, &mut layout.grid);
        }
    }

    layout
}
