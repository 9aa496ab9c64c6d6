use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use review_timeline::core::{
    BucketRequest, BucketSet, GeometryMapper, StatsPolicy, ViewerTimeZone, bucketize,
};

fn six_hour_window() -> BucketSet {
    let now = Utc
        .with_ymd_and_hms(2024, 5, 2, 12, 0, 0)
        .single()
        .expect("valid time");
    bucketize(
        &[],
        BucketRequest {
            now,
            timezone: ViewerTimeZone::Utc,
            bucket_hours: 6,
            window_hours: 84,
        },
        &StatsPolicy::default(),
    )
}

#[test]
fn midpoint_snaps_to_the_later_boundary() {
    let buckets = six_hour_window();
    let geometry = GeometryMapper::for_buckets(&buckets, 840.0, 0.0);
    assert_relative_eq!(geometry.pixels_per_hour(), 10.0);

    assert_eq!(geometry.nearest_boundary(&buckets, 149.9), 2);
    assert_eq!(geometry.nearest_boundary(&buckets, 150.0), 3);
    assert_eq!(geometry.nearest_boundary(&buckets, 121.0), 2);
    assert_eq!(geometry.nearest_boundary(&buckets, 119.0), 2);
}

#[test]
fn coordinates_outside_the_axis_clamp_to_end_boundaries() {
    let buckets = six_hour_window();
    let geometry = GeometryMapper::for_buckets(&buckets, 840.0, 0.0);
    assert_eq!(geometry.nearest_boundary(&buckets, -50.0), 0);
    assert_eq!(geometry.nearest_boundary(&buckets, f64::NAN), 0);
    assert_eq!(geometry.nearest_boundary(&buckets, 5_000.0), buckets.len());
}

#[test]
fn left_margin_is_removed_before_hit_testing() {
    let buckets = six_hour_window();
    let geometry = GeometryMapper::for_buckets(&buckets, 840.0, 28.0);
    assert_eq!(geometry.nearest_boundary(&buckets, 178.0), 3);
    assert_eq!(geometry.nearest_boundary(&buckets, 177.0), 2);
    assert_relative_eq!(geometry.panel_x_to_hour(28.0 + 365.0), 36.5);
    assert_relative_eq!(geometry.boundary_to_x(&buckets, buckets.len()), 840.0);
    assert_relative_eq!(geometry.boundary_to_x(&buckets, 4), 240.0);
}
