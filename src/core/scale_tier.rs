use serde::{Deserialize, Serialize};

use crate::core::labels::{LabelGenerator, TicSpec, TimeFormat};
use crate::core::types::clamp_axis_width;

/// Default label spacing policy: no more than one label every 50 pixels.
pub const DEFAULT_MIN_PX_PER_LABEL: f64 = 50.0;

/// One row of the scaling table.
///
/// A tier applies while `min_hours_per_label < hours_per_label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScaleTier {
    pub hours_per_label: u32,
    pub bucket_hours: u32,
    pub red: TicSpec,
    pub major: TicSpec,
    pub minor: TicSpec,
}

impl ScaleTier {
    /// Generator assignments after applying the time format.
    ///
    /// `HoursOnly` drops red tics and counts hours from the origin.
    #[must_use]
    pub fn tic_specs(&self, format: TimeFormat) -> (TicSpec, TicSpec, TicSpec) {
        match format {
            TimeFormat::HoursOnly => (
                TicSpec::blank(),
                TicSpec {
                    generator: LabelGenerator::HoursFromNow,
                    ..self.major
                },
                TicSpec {
                    generator: LabelGenerator::HoursFromNow,
                    ..self.minor
                },
            ),
            TimeFormat::TwelveHour | TimeFormat::TwentyFourHour => {
                (self.red, self.major, self.minor)
            }
        }
    }
}

pub const DEFAULT_SCALE_TIERS: [ScaleTier; 7] = [
    ScaleTier {
        hours_per_label: 1,
        bucket_hours: 1,
        red: TicSpec::new(LabelGenerator::Weekday, 1),
        major: TicSpec::new(LabelGenerator::Hour, 1),
        minor: TicSpec::blank(),
    },
    ScaleTier {
        hours_per_label: 3,
        bucket_hours: 1,
        red: TicSpec::new(LabelGenerator::Weekday, 1),
        major: TicSpec::new(LabelGenerator::Hour, 3),
        minor: TicSpec::new(LabelGenerator::Hour, 1),
    },
    ScaleTier {
        hours_per_label: 6,
        bucket_hours: 6,
        red: TicSpec::new(LabelGenerator::Weekday, 1),
        major: TicSpec::new(LabelGenerator::Hour, 6),
        minor: TicSpec::new(LabelGenerator::Hour, 1),
    },
    ScaleTier {
        hours_per_label: 12,
        bucket_hours: 6,
        red: TicSpec::new(LabelGenerator::Weekday, 1),
        major: TicSpec::new(LabelGenerator::Hour, 12),
        minor: TicSpec::new(LabelGenerator::Hour, 3),
    },
    ScaleTier {
        hours_per_label: 24,
        bucket_hours: 6,
        red: TicSpec::new(LabelGenerator::Week, 1),
        major: TicSpec::new(LabelGenerator::Weekday, 1),
        minor: TicSpec::new(LabelGenerator::Hour, 6),
    },
    ScaleTier {
        hours_per_label: 48,
        bucket_hours: 12,
        red: TicSpec::short(LabelGenerator::Week, 1),
        major: TicSpec::short(LabelGenerator::Weekday, 1),
        minor: TicSpec::new(LabelGenerator::Hour, 12),
    },
    ScaleTier {
        hours_per_label: 720,
        bucket_hours: 24,
        red: TicSpec::new(LabelGenerator::Month, 1),
        major: TicSpec::new(LabelGenerator::MonthDay, 5),
        minor: TicSpec::new(LabelGenerator::Weekday, 1),
    },
];

/// Result of scale selection for one window/width combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleSelection {
    pub tier_index: usize,
    pub tier: ScaleTier,
    pub min_hours_per_label: f64,
}

impl ScaleSelection {
    #[must_use]
    pub fn bucket_hours(&self) -> u32 {
        self.tier.bucket_hours
    }
}

/// Picks the first tier whose `hours_per_label` exceeds the minimum hours a
/// label needs at this width, falling back to the coarsest tier.
///
/// `tiers` must be ordered by increasing `hours_per_label` and non-empty;
/// an empty table falls back to the default table.
#[must_use]
pub fn select_scale(
    tiers: &[ScaleTier],
    window_hours: u32,
    axis_width_px: f64,
    min_px_per_label: f64,
) -> ScaleSelection {
    let tiers = if tiers.is_empty() {
        &DEFAULT_SCALE_TIERS[..]
    } else {
        tiers
    };
    let width = clamp_axis_width(axis_width_px);
    let min_px_per_label = if min_px_per_label.is_finite() && min_px_per_label > 0.0 {
        min_px_per_label
    } else {
        DEFAULT_MIN_PX_PER_LABEL
    };
    let min_hours_per_label = min_px_per_label * f64::from(window_hours.max(1)) / width;

    let last = tiers.len() - 1;
    let tier_index = tiers
        .iter()
        .position(|tier| f64::from(tier.hours_per_label) > min_hours_per_label)
        .unwrap_or(last);

    ScaleSelection {
        tier_index,
        tier: tiers[tier_index],
        min_hours_per_label,
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_MIN_PX_PER_LABEL, DEFAULT_SCALE_TIERS, select_scale};

    #[test]
    fn default_table_is_monotonic() {
        for pair in DEFAULT_SCALE_TIERS.windows(2) {
            assert!(pair[0].hours_per_label < pair[1].hours_per_label);
            assert!(pair[0].bucket_hours <= pair[1].bucket_hours);
            assert_eq!(24 % pair[0].bucket_hours, 0);
        }
    }

    #[test]
    fn very_narrow_axis_clamps_to_last_tier() {
        let selection = select_scale(&DEFAULT_SCALE_TIERS, 125 * 24, 60.0, 50.0);
        assert_eq!(selection.tier_index, DEFAULT_SCALE_TIERS.len() - 1);
        assert_eq!(selection.bucket_hours(), 24);
    }

    #[test]
    fn threshold_equal_to_tier_moves_to_next_tier() {
        // 50 * 24 / 400 = 3.0 exactly; the 3-hour tier must be skipped.
        let selection = select_scale(&DEFAULT_SCALE_TIERS, 24, 400.0, DEFAULT_MIN_PX_PER_LABEL);
        assert_eq!(selection.tier.hours_per_label, 6);
    }

    #[test]
    fn invalid_label_spacing_uses_default_policy() {
        let selection = select_scale(&DEFAULT_SCALE_TIERS, 24, 1_200.0, f64::NAN);
        assert_eq!(selection.min_hours_per_label, 1.0);
        assert_eq!(selection.tier.hours_per_label, 3);
    }
}
