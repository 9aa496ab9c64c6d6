use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::labels::{month_abbrev, weekday_abbrev};
use crate::core::stats::LEVEL_BAND_COUNT;
use crate::core::{
    BucketSet, BucketStats, ItemCategory, ReviewItem, SrsDisplayMode, StageGroup, StatsPolicy,
    TimeFormat, level_band_label,
};
use crate::interaction::BucketRange;

use super::ReviewDetailsMode;

/// Dates more than six and a half days past today also show the month.
const SHOW_MONTH_AFTER_HOURS: i64 = 156;

/// One labeled count line of the summary pop-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub count: u32,
    pub label: String,
}

/// Display payload for a highlighted bucket range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub range: BucketRange,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: String,
    pub stats: BucketStats,
    pub sticky: bool,
    pub rows: Vec<SummaryRow>,
    /// Items in display order; empty unless the details mode lists items.
    pub items: Vec<ReviewItem>,
    /// Host should attach meanings and readings to `items`.
    #[serde(default)]
    pub wants_item_details: bool,
}

/// Inputs shared by every summary built from one bucket set.
#[derive(Debug, Clone, Copy)]
pub struct SummaryContext<'a> {
    pub buckets: &'a BucketSet,
    pub now: DateTime<Utc>,
    pub time_format: TimeFormat,
    pub policy: StatsPolicy,
    pub details: ReviewDetailsMode,
}

impl RangeSummary {
    /// Re-aggregates the buckets of `range` and formats the pop-up payload.
    #[must_use]
    pub fn build(context: &SummaryContext<'_>, range: BucketRange, sticky: bool) -> Self {
        let buckets = context.buckets;
        let end = range.end.min(buckets.len());
        let range = BucketRange::between(range.start.min(end), end);
        let (items, stats) = buckets.aggregate_range(range.as_range(), &context.policy);

        let start_time = buckets.boundary_time(range.start);
        let closing = buckets.boundary_time(range.end);
        let shift_minutes = i64::from(buckets.timezone().hour_shift_minutes(closing));
        let end_time = closing + TimeDelta::minutes(shift_minutes - 1);

        Self {
            range,
            start_time,
            end_time,
            title: range_title(context, range, start_time, end_time),
            rows: summary_rows(&stats, context.policy.srs_display),
            stats,
            sticky,
            items: if context.details.includes_item_list() {
                items
            } else {
                Vec::new()
            },
            wants_item_details: context.details.includes_item_details(),
        }
    }
}

fn range_title(
    context: &SummaryContext<'_>,
    range: BucketRange,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> String {
    let buckets = context.buckets;
    let timezone = buckets.timezone();
    let now = timezone.to_local(context.now);
    let start = timezone.to_local(start_time);
    let end = timezone.to_local(end_time);

    let formatter = DateFormatter {
        anchor: buckets.anchor(),
        today: now.date_naive(),
        time_format: context.time_format,
    };
    let allow_now = range.start == 0 && buckets.bucket_hours() == 1;
    let same_day = start.date_naive() == end.date_naive();
    let days_out = end.date_naive() - now.date_naive();
    let show_month = now.month() != start.month() || days_out.num_hours() > SHOW_MONTH_AFTER_HOURS;

    let first = formatter.format(start, allow_now, true, show_month);
    if range.len() > 1 || buckets.bucket_hours() > 1 {
        let last = formatter.format(end, false, !same_day, show_month && !same_day);
        format!("{first} to {last}")
    } else {
        first
    }
}

struct DateFormatter {
    anchor: DateTime<Utc>,
    today: NaiveDate,
    time_format: TimeFormat,
}

impl DateFormatter {
    fn format(
        &self,
        time: DateTime<FixedOffset>,
        allow_now: bool,
        show_day: bool,
        mut show_month: bool,
    ) -> String {
        if allow_now && time.with_timezone(&Utc) >= self.anchor {
            return "Now".to_owned();
        }

        let mut parts: Vec<String> = Vec::with_capacity(2);
        if show_day {
            let mut day = if time.date_naive() == self.today {
                show_month = false;
                "Today".to_owned()
            } else {
                weekday_abbrev(time.weekday()).to_owned()
            };
            if show_month {
                day.push_str(&format!(", {} {}", month_abbrev(time.month0()), time.day()));
            }
            parts.push(day);
        }
        parts.push(clock_time(time, self.time_format));
        parts.join(" ")
    }
}

fn clock_time(time: DateTime<FixedOffset>, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwentyFourHour => format!("{:02}:{:02}", time.hour(), time.minute()),
        TimeFormat::TwelveHour | TimeFormat::HoursOnly => {
            let (is_pm, hour12) = time.hour12();
            let suffix = if is_pm { "pm" } else { "am" };
            format!("{hour12:02}:{:02}{suffix}", time.minute())
        }
    }
}

fn summary_rows(stats: &BucketStats, srs_display: SrsDisplayMode) -> Vec<SummaryRow> {
    let mut rows = vec![row(stats.count, "reviews")];
    rows.extend(
        ItemCategory::ALL
            .into_iter()
            .map(|category| row(stats.category(category), category.plural_label())),
    );
    rows.extend(
        StageGroup::ALL
            .into_iter()
            .filter(|group| *group != StageGroup::Burn || srs_display == SrsDisplayMode::Next)
            .map(|group| row(stats.stage_group(group), group.label())),
    );
    rows.extend((0..LEVEL_BAND_COUNT).map(|band| SummaryRow {
        count: stats.by_level_band[band],
        label: level_band_label(band),
    }));
    if stats.current_level_count > 0 {
        rows.push(row(stats.current_level_count, "Current Level"));
    }
    if stats.burn_count > 0 {
        let label = if stats.burn_count > 1 {
            "Burn Items"
        } else {
            "Burn Item"
        };
        rows.push(row(stats.burn_count, label));
    }
    rows
}

fn row(count: u32, label: &str) -> SummaryRow {
    SummaryRow {
        count,
        label: label.to_owned(),
    }
}

/// Text for the window length control: hours up to a day, days beyond.
#[must_use]
pub fn window_label(days: f64) -> String {
    if days <= 1.0 {
        format!("{} hours", days * 24.0)
    } else {
        format!("{days:.2} days")
    }
}
