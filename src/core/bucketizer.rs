use std::ops::Range;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::item::ReviewItem;
use crate::core::primitives::{hours_after, start_of_utc_hour};
use crate::core::stats::{BucketStats, StatsPolicy, aggregate};
use crate::core::types::ViewerTimeZone;

pub const MAX_BUCKET_HOURS: u32 = 24;

/// Half-open interval `[start_hour, end_hour)` of the window and the items
/// due inside it, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub start_hour: u32,
    pub end_hour: u32,
    pub items: Vec<ReviewItem>,
    pub stats: BucketStats,
}

impl Bucket {
    #[must_use]
    pub fn span_hours(&self) -> u32 {
        self.end_hour - self.start_hour
    }

    #[must_use]
    pub fn midpoint_hour(&self) -> f64 {
        f64::from(self.start_hour + self.end_hour) / 2.0
    }
}

/// Inputs of one bucketing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketRequest {
    pub now: DateTime<Utc>,
    pub timezone: ViewerTimeZone,
    pub bucket_hours: u32,
    pub window_hours: u32,
}

/// All buckets of one window, rebuilt from scratch on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSet {
    anchor: DateTime<Utc>,
    timezone: ViewerTimeZone,
    bucket_hours: u32,
    total_hours: u32,
    buckets: Vec<Bucket>,
    hour_to_bucket: Vec<usize>,
    total_reviews: u32,
    max_bucket_count: u32,
}

/// Local-hour-aligned origin of the window containing `now`.
///
/// Starts at the current UTC hour and steps back until the viewer's local
/// hour is a multiple of `bucket_hours`.
#[must_use]
pub fn window_anchor(
    now: DateTime<Utc>,
    timezone: ViewerTimeZone,
    bucket_hours: u32,
) -> DateTime<Utc> {
    let bucket_hours = bucket_hours.clamp(1, MAX_BUCKET_HOURS);
    let mut anchor = start_of_utc_hour(now);
    while timezone.to_local(anchor).hour() % bucket_hours != 0 {
        anchor = hours_after(anchor, -1);
    }
    anchor
}

/// Partitions due-time-sorted `items` into hour-aligned buckets.
///
/// Boundaries follow the viewer's local clock, so a bucket spanning a
/// daylight-saving change is an hour shorter or longer than `bucket_hours`.
/// Items due before the first boundary, including overdue ones, land in
/// bucket 0; items due at or after the last boundary are left out.
#[must_use]
pub fn bucketize(items: &[ReviewItem], request: BucketRequest, policy: &StatsPolicy) -> BucketSet {
    let bucket_hours = request.bucket_hours.clamp(1, MAX_BUCKET_HOURS);
    let window_hours = request.window_hours.max(1);
    let anchor = window_anchor(request.now, request.timezone, bucket_hours);

    let mut buckets = Vec::new();
    let mut hour_to_bucket = Vec::with_capacity(window_hours as usize + bucket_hours as usize);
    let mut cursor = 0_usize;
    let mut bucket_start = 0_u32;
    let mut hour = 0_u32;
    let mut total_reviews = 0_u32;
    let mut max_bucket_count = 0_u32;

    loop {
        hour_to_bucket.push(buckets.len());
        hour += 1;

        let boundary = hours_after(anchor, i64::from(hour));
        if request.timezone.to_local(boundary).hour() % bucket_hours != 0 {
            continue;
        }

        let first = cursor;
        while cursor < items.len() && items[cursor].available_at < boundary {
            cursor += 1;
        }
        let mut bucket_items = items[first..cursor].to_vec();
        let stats = aggregate(&mut bucket_items, policy);
        total_reviews += stats.count;
        max_bucket_count = max_bucket_count.max(stats.count);
        buckets.push(Bucket {
            start_hour: bucket_start,
            end_hour: hour,
            items: bucket_items,
            stats,
        });

        if hour >= window_hours {
            break;
        }
        bucket_start = hour;
    }

    BucketSet {
        anchor,
        timezone: request.timezone,
        bucket_hours,
        total_hours: hour,
        buckets,
        hour_to_bucket,
        total_reviews,
        max_bucket_count,
    }
}

impl BucketSet {
    #[must_use]
    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    #[must_use]
    pub fn timezone(&self) -> ViewerTimeZone {
        self.timezone
    }

    #[must_use]
    pub fn bucket_hours(&self) -> u32 {
        self.bucket_hours
    }

    /// Authoritative window length; may exceed the request by up to one bucket.
    #[must_use]
    pub fn total_hours(&self) -> u32 {
        self.total_hours
    }

    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[must_use]
    pub fn total_reviews(&self) -> u32 {
        self.total_reviews
    }

    #[must_use]
    pub fn max_bucket_count(&self) -> u32 {
        self.max_bucket_count
    }

    /// Index of the bucket containing `hour`, clamped to the window.
    #[must_use]
    pub fn bucket_at_hour(&self, hour: u32) -> usize {
        let last = self.hour_to_bucket.len().saturating_sub(1);
        self.hour_to_bucket
            .get((hour as usize).min(last))
            .copied()
            .unwrap_or(0)
    }

    /// Hour offset of a bucket boundary; `len()` maps to the window end.
    #[must_use]
    pub fn boundary_hour(&self, boundary: usize) -> u32 {
        self.buckets
            .get(boundary)
            .map_or(self.total_hours, |bucket| bucket.start_hour)
    }

    #[must_use]
    pub fn boundary_time(&self, boundary: usize) -> DateTime<Utc> {
        hours_after(self.anchor, i64::from(self.boundary_hour(boundary)))
    }

    /// Concatenates the items of a contiguous bucket range and aggregates them.
    ///
    /// The range is clamped to the bucket count.
    #[must_use]
    pub fn aggregate_range(
        &self,
        range: Range<usize>,
        policy: &StatsPolicy,
    ) -> (Vec<ReviewItem>, BucketStats) {
        let end = range.end.min(self.buckets.len());
        let start = range.start.min(end);
        let mut items: Vec<ReviewItem> = self.buckets[start..end]
            .iter()
            .flat_map(|bucket| bucket.items.iter().cloned())
            .collect();
        let stats = aggregate(&mut items, policy);
        (items, stats)
    }
}
