use chrono::{DateTime, TimeZone, Utc};
use review_timeline::core::{
    AxisRequest, DEFAULT_SCALE_TIERS, LabelCollisionPolicy, TicKind, TimeFormat, ViewerTimeZone,
    generate_axis,
};

fn thursday_noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0)
        .single()
        .expect("valid time")
}

fn request(tier_index: usize, total_hours: u32, min_hours_per_label: f64) -> AxisRequest {
    AxisRequest {
        anchor: thursday_noon(),
        timezone: ViewerTimeZone::Utc,
        total_hours,
        tier: DEFAULT_SCALE_TIERS[tier_index],
        min_hours_per_label,
        time_format: TimeFormat::TwelveHour,
    }
}

fn texts(request: &AxisRequest, policy: &LabelCollisionPolicy) -> Vec<String> {
    generate_axis(request, policy)
        .labels
        .into_iter()
        .map(|label| label.text)
        .collect()
}

#[test]
fn six_hour_tier_labels_every_six_hours_with_weekday_at_midnight() {
    let axis = generate_axis(&request(2, 84, 84.0 * 50.0 / 760.0), &LabelCollisionPolicy::default());

    assert_eq!(axis.labels.len(), 14);
    let first: Vec<&str> = axis.labels[..4].iter().map(|l| l.text.as_str()).collect();
    assert_eq!(first, ["12pm", "6pm", "Fri", "6am"]);

    let red: Vec<(u32, &str)> = axis
        .labels
        .iter()
        .filter(|label| label.kind == TicKind::Red)
        .map(|label| (label.hour, label.text.as_str()))
        .collect();
    assert_eq!(red, [(12, "Fri"), (36, "Sat"), (60, "Sun")]);

    assert_eq!(axis.grid.len(), 83);
    assert!(axis.grid.iter().all(|tic| tic.hour > 0));
}

#[test]
fn twenty_four_hour_format_uses_zero_padded_clock() {
    let mut req = request(2, 24, 3.0);
    req.time_format = TimeFormat::TwentyFourHour;
    assert_eq!(
        texts(&req, &LabelCollisionPolicy::default()),
        ["12:00", "18:00", "Fri", "06:00"]
    );
}

#[test]
fn crowded_major_label_is_retracted_before_a_red_label() {
    let req = request(3, 48, 24.0);
    assert_eq!(texts(&req, &LabelCollisionPolicy::default()), ["Fri", "Sat"]);

    let keep = LabelCollisionPolicy {
        retract_major_before_red: false,
        ..LabelCollisionPolicy::default()
    };
    assert_eq!(texts(&req, &keep), ["12pm", "Fri", "Sat"]);
}

#[test]
fn sub_hour_offsets_shift_tic_positions_left() {
    let india_anchor = Utc
        .with_ymd_and_hms(2024, 5, 2, 7, 0, 0)
        .single()
        .expect("valid time");
    let req = AxisRequest {
        anchor: india_anchor,
        timezone: ViewerTimeZone::FixedOffsetMinutes { minutes: 330 },
        ..request(2, 12, 3.0)
    };
    let axis = generate_axis(&req, &LabelCollisionPolicy::default());

    let first = &axis.labels[0];
    assert_eq!(first.text, "12pm");
    assert!((first.position_hours + 0.5).abs() <= 1e-9);
    assert!(
        axis.grid
            .iter()
            .all(|tic| (tic.position_hours - (f64::from(tic.hour) - 0.5)).abs() <= 1e-9)
    );
}
