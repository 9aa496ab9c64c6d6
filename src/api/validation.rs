use tracing::debug;

use crate::core::{LabelCollisionPolicy, MAX_BUCKET_HOURS, ScaleTier, ViewerTimeZone};
use crate::error::{TimelineError, TimelineResult};

use super::TimelineConfig;
use super::engine_config::{MAX_WINDOW_DAYS_CEILING, MIN_WINDOW_DAYS};

const MAX_TIMEZONE_OFFSET_MINUTES: i32 = 14 * 60;

pub(super) fn validate_timeline_config(mut config: TimelineConfig) -> TimelineResult<TimelineConfig> {
    if !config.viewport.is_valid() {
        return Err(TimelineError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        });
    }

    if !(1..=MAX_WINDOW_DAYS_CEILING).contains(&config.max_days) {
        return Err(TimelineError::InvalidConfig(format!(
            "max_days must be in 1..={MAX_WINDOW_DAYS_CEILING}"
        )));
    }
    config.days = validate_window_days(config.days, config.max_days)?;

    if config.max_bar_width == Some(0) {
        config.max_bar_width = None;
    }
    if config.max_bar_height == Some(0) {
        config.max_bar_height = None;
    }
    if config.user_level == 0 {
        return Err(TimelineError::InvalidConfig(
            "user_level must be >= 1".to_owned(),
        ));
    }

    let offset_in_range = match config.timezone {
        ViewerTimeZone::FixedOffsetMinutes { minutes } => {
            (-MAX_TIMEZONE_OFFSET_MINUTES..=MAX_TIMEZONE_OFFSET_MINUTES)
                .contains(&i32::from(minutes))
        }
        ViewerTimeZone::Utc | ViewerTimeZone::Named { .. } | ViewerTimeZone::Local => true,
    };
    if !offset_in_range {
        return Err(TimelineError::InvalidConfig(
            "timezone offset must be between -840 and 840 minutes".to_owned(),
        ));
    }

    validate_label_policy(config.label_policy)?;
    validate_scale_tiers(&config.scale_tiers)?;

    Ok(config)
}

/// Returns `days` clamped to `max_days`; non-finite or too-short windows fail.
pub(super) fn validate_window_days(days: f64, max_days: u32) -> TimelineResult<f64> {
    if !days.is_finite() {
        return Err(TimelineError::InvalidConfig(
            "days must be finite".to_owned(),
        ));
    }
    if days < MIN_WINDOW_DAYS {
        return Err(TimelineError::InvalidConfig(
            "days must cover at least a quarter hour".to_owned(),
        ));
    }
    let ceiling = f64::from(max_days);
    if days > ceiling {
        debug!(days, max_days, "clamping window length to max_days");
        return Ok(ceiling);
    }
    Ok(days)
}

fn validate_label_policy(policy: LabelCollisionPolicy) -> TimelineResult<()> {
    if !policy.min_px_per_label.is_finite() || policy.min_px_per_label <= 0.0 {
        return Err(TimelineError::InvalidConfig(
            "label_policy.min_px_per_label must be finite and > 0".to_owned(),
        ));
    }
    if !policy.spacing_factor.is_finite() || policy.spacing_factor < 0.0 {
        return Err(TimelineError::InvalidConfig(
            "label_policy.spacing_factor must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

fn validate_scale_tiers(tiers: &[ScaleTier]) -> TimelineResult<()> {
    if tiers.is_empty() {
        return Err(TimelineError::InvalidConfig(
            "scale_tiers must not be empty".to_owned(),
        ));
    }
    for tier in tiers {
        if tier.hours_per_label == 0 {
            return Err(TimelineError::InvalidConfig(
                "scale tier hours_per_label must be > 0".to_owned(),
            ));
        }
        if !(1..=MAX_BUCKET_HOURS).contains(&tier.bucket_hours) {
            return Err(TimelineError::InvalidConfig(format!(
                "scale tier bucket_hours must be in 1..={MAX_BUCKET_HOURS}"
            )));
        }
        if MAX_BUCKET_HOURS % tier.bucket_hours != 0 {
            return Err(TimelineError::InvalidConfig(
                "scale tier bucket_hours must divide a day".to_owned(),
            ));
        }
        for spec in [tier.red, tier.major, tier.minor] {
            if spec.quantity == 0 {
                return Err(TimelineError::InvalidConfig(
                    "scale tier label quantity must be > 0".to_owned(),
                ));
            }
        }
    }
    let ordered = tiers.windows(2).all(|pair| {
        pair[0].hours_per_label < pair[1].hours_per_label
            && pair[0].bucket_hours <= pair[1].bucket_hours
    });
    if !ordered {
        return Err(TimelineError::InvalidConfig(
            "scale tiers must increase in hours_per_label without shrinking buckets".to_owned(),
        ));
    }
    Ok(())
}
