use serde::{Deserialize, Serialize};

use crate::core::bucketizer::BucketSet;
use crate::core::types::clamp_axis_width;

/// Maps window hours and bucket boundaries to axis pixels and back.
///
/// Pixel inputs to the inverse mapping are panel coordinates; the left
/// margin is removed before hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryMapper {
    axis_width_px: f64,
    left_margin_px: f64,
    total_hours: u32,
    pixels_per_hour: f64,
}

impl GeometryMapper {
    #[must_use]
    pub fn new(axis_width_px: f64, left_margin_px: f64, total_hours: u32) -> Self {
        let axis_width_px = clamp_axis_width(axis_width_px);
        let total_hours = total_hours.max(1);
        let left_margin_px = if left_margin_px.is_finite() {
            left_margin_px.max(0.0)
        } else {
            0.0
        };
        Self {
            axis_width_px,
            left_margin_px,
            total_hours,
            pixels_per_hour: axis_width_px / f64::from(total_hours),
        }
    }

    #[must_use]
    pub fn for_buckets(buckets: &BucketSet, axis_width_px: f64, left_margin_px: f64) -> Self {
        Self::new(axis_width_px, left_margin_px, buckets.total_hours())
    }

    #[must_use]
    pub fn axis_width_px(self) -> f64 {
        self.axis_width_px
    }

    #[must_use]
    pub fn left_margin_px(self) -> f64 {
        self.left_margin_px
    }

    #[must_use]
    pub fn pixels_per_hour(self) -> f64 {
        self.pixels_per_hour
    }

    /// Axis-relative x of an hour offset, rounded to whole pixels.
    #[must_use]
    pub fn hour_to_x(self, hour: f64) -> f64 {
        (hour * self.pixels_per_hour).round()
    }

    /// Axis-relative x of a bucket boundary; `buckets.len()` is the axis end.
    #[must_use]
    pub fn boundary_to_x(self, buckets: &BucketSet, boundary: usize) -> f64 {
        self.hour_to_x(f64::from(buckets.boundary_hour(boundary)))
    }

    /// Fractional hour under a panel x coordinate, clamped to the window.
    #[must_use]
    pub fn panel_x_to_hour(self, panel_x: f64) -> f64 {
        let x = panel_x - self.left_margin_px;
        if !x.is_finite() || x <= 0.0 {
            return 0.0;
        }
        (x / self.pixels_per_hour).min(f64::from(self.total_hours))
    }

    /// Snaps a panel x coordinate to the nearest bucket boundary.
    ///
    /// Inside a bucket, positions before its midpoint resolve to the bucket's
    /// start boundary and positions at or past it to the next boundary.
    /// Coordinates outside the axis clamp to the first or last boundary.
    #[must_use]
    pub fn nearest_boundary(self, buckets: &BucketSet, panel_x: f64) -> usize {
        if buckets.is_empty() {
            return 0;
        }
        let hour = self.panel_x_to_hour(panel_x);
        let bucket_index = buckets.bucket_at_hour(hour.floor() as u32);
        let Some(bucket) = buckets.buckets().get(bucket_index) else {
            return buckets.len();
        };
        if hour < bucket.midpoint_hour() {
            bucket_index
        } else {
            bucket_index + 1
        }
    }
}
