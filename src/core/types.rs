use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Smallest axis width handed to scale selection and geometry.
///
/// Narrower layouts are clamped so label thresholds stay finite.
pub const MIN_AXIS_WIDTH_PX: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Horizontal room left for the time axis after the count-axis margin.
    #[must_use]
    pub fn axis_width(self, left_margin_px: f64) -> f64 {
        clamp_axis_width(f64::from(self.width) - left_margin_px)
    }
}

#[must_use]
pub fn clamp_axis_width(width_px: f64) -> f64 {
    if width_px.is_finite() {
        width_px.max(MIN_AXIS_WIDTH_PX)
    } else {
        MIN_AXIS_WIDTH_PX
    }
}

/// Viewer timezone used for hour alignment and label text.
///
/// Offsets are resolved per instant, so named zones and `Local` follow
/// daylight-saving changes inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerTimeZone {
    #[default]
    Utc,
    FixedOffsetMinutes {
        minutes: i16,
    },
    /// IANA zone such as `America/New_York`.
    Named {
        zone: Tz,
    },
    /// Host system zone.
    Local,
}

impl ViewerTimeZone {
    /// Offset east of UTC in effect at `instant`.
    #[must_use]
    pub fn offset_at(self, instant: DateTime<Utc>) -> FixedOffset {
        let naive = instant.naive_utc();
        match self {
            Self::Utc => Utc.fix(),
            Self::FixedOffsetMinutes { minutes } => {
                FixedOffset::east_opt(i32::from(minutes) * 60).unwrap_or_else(|| Utc.fix())
            }
            Self::Named { zone } => zone.offset_from_utc_datetime(&naive).fix(),
            Self::Local => Local.offset_from_utc_datetime(&naive).fix(),
        }
    }

    #[must_use]
    pub fn to_local(self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset_at(instant))
    }

    /// Minutes past the local hour at which the UTC hour of `instant` begins.
    ///
    /// Zero for whole-hour offsets, 30 for `+05:30` or `-03:30`, 45 for `+05:45`.
    #[must_use]
    pub fn hour_shift_minutes(self, instant: DateTime<Utc>) -> i32 {
        (self.offset_at(instant).local_minus_utc() / 60).rem_euclid(60)
    }

    #[must_use]
    pub fn hour_shift_hours(self, instant: DateTime<Utc>) -> f64 {
        f64::from(self.hour_shift_minutes(instant)) / 60.0
    }
}
