use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use review_timeline::api::{TimelineConfig, TimelineEngine};
use review_timeline::core::{
    AxisRequest, BucketRequest, DEFAULT_SCALE_TIERS, FixedClock, LabelCollisionPolicy,
    ReviewItem, StatsPolicy, SubjectType, TimeFormat, ViewerTimeZone, Viewport, bucketize,
    generate_axis, select_scale, sort_by_due_time,
};
use review_timeline::render::NullRenderer;
use std::hint::black_box;

fn inventory(count: u64) -> Vec<ReviewItem> {
    let start = Utc
        .with_ymd_and_hms(2024, 5, 2, 12, 0, 0)
        .single()
        .expect("valid time");
    let subjects = [
        SubjectType::Radical,
        SubjectType::Kanji,
        SubjectType::Vocabulary,
    ];
    let mut items: Vec<ReviewItem> = (0..count)
        .map(|i| {
            ReviewItem::new(
                i,
                subjects[(i % 3) as usize],
                format!("item-{i}"),
                (i % 60 + 1) as u32,
                (i % 9 + 1) as u8,
                start + TimeDelta::minutes((i * 37 % 20_000) as i64 - 600),
            )
            .expect("valid generated item")
        })
        .collect();
    sort_by_due_time(&mut items);
    items
}

fn bench_bucketize_10k(c: &mut Criterion) {
    let items = inventory(10_000);
    let request = BucketRequest {
        now: Utc
            .with_ymd_and_hms(2024, 5, 2, 12, 20, 0)
            .single()
            .expect("valid time"),
        timezone: ViewerTimeZone::FixedOffsetMinutes { minutes: -300 },
        bucket_hours: 6,
        window_hours: 336,
    };
    let policy = StatsPolicy::default();

    c.bench_function("bucketize_10k_two_weeks", |b| {
        b.iter(|| {
            let _ = bucketize(black_box(&items), black_box(request), black_box(&policy));
        })
    });
}

fn bench_generate_axis_two_weeks(c: &mut Criterion) {
    let scale = select_scale(&DEFAULT_SCALE_TIERS, 336, 760.0, 50.0);
    let request = AxisRequest {
        anchor: Utc
            .with_ymd_and_hms(2024, 5, 2, 12, 0, 0)
            .single()
            .expect("valid time"),
        timezone: ViewerTimeZone::Utc,
        total_hours: 336,
        tier: scale.tier,
        min_hours_per_label: scale.min_hours_per_label,
        time_format: TimeFormat::TwelveHour,
    };
    let policy = LabelCollisionPolicy::default();

    c.bench_function("generate_axis_two_weeks", |b| {
        b.iter(|| {
            let _ = generate_axis(black_box(&request), black_box(&policy));
        })
    });
}

fn bench_engine_rebuild_and_render_5k(c: &mut Criterion) {
    let clock = FixedClock::new(
        Utc.with_ymd_and_hms(2024, 5, 2, 12, 20, 0)
            .single()
            .expect("valid time"),
    );
    let config = TimelineConfig::new(Viewport::new(1200, 120)).with_days(7.0);
    let mut engine =
        TimelineEngine::new(NullRenderer::default(), &clock, config).expect("engine init");
    let items = inventory(5_000);

    c.bench_function("engine_rebuild_and_render_5k", |b| {
        b.iter(|| {
            engine.set_items(black_box(items.clone()));
            engine.render().expect("render should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_bucketize_10k,
    bench_generate_axis_two_weeks,
    bench_engine_rebuild_and_render_5k
);
criterion_main!(benches);
