use chrono::{DateTime, TimeDelta, Utc};

pub const SECONDS_PER_HOUR: i64 = 3_600;

/// Truncates a timestamp to the start of its UTC hour.
#[must_use]
pub fn start_of_utc_hour(time: DateTime<Utc>) -> DateTime<Utc> {
    let seconds_into_hour = time.timestamp().rem_euclid(SECONDS_PER_HOUR);
    time - TimeDelta::seconds(seconds_into_hour)
        - TimeDelta::nanoseconds(i64::from(time.timestamp_subsec_nanos()))
}

#[must_use]
pub fn hours_after(origin: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    origin + TimeDelta::hours(hours)
}

/// Fractional hours elapsed from `origin` to `time`.
#[must_use]
pub fn hours_between(origin: DateTime<Utc>, time: DateTime<Utc>) -> f64 {
    (time - origin).num_milliseconds() as f64 / 3_600_000.0
}
