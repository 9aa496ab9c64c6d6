use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use review_timeline::api::{RebuildTrigger, TimelineConfig, TimelineEngine};
use review_timeline::core::{FixedClock, ItemRecord, ReviewItem, Viewport};
use review_timeline::interaction::HighlightPhase;
use review_timeline::render::NullRenderer;
use review_timeline::TimelineError;

fn utc(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, minute, 0)
        .single()
        .expect("valid time")
}

fn record(id: u64, object: &str, available_at: Option<DateTime<Utc>>) -> ItemRecord {
    ItemRecord {
        id,
        object: object.to_owned(),
        slug: format!("s{id}"),
        level: 4,
        srs_stage: 3,
        available_at,
    }
}

#[test]
fn engine_smoke_flow() {
    let clock = FixedClock::new(utc(2, 12, 20));
    let config = TimelineConfig::new(Viewport::new(848, 100));
    let mut engine =
        TimelineEngine::new(NullRenderer::default(), &clock, config).expect("engine init");

    assert_eq!(engine.buckets().len(), 14);
    assert_eq!(engine.scale().bucket_hours(), 6);
    assert_eq!(engine.total_reviews(), 0);
    assert_eq!(engine.window_label(), "3.50 days");

    let accepted = engine.set_item_records(vec![
        record(1, "kanji", Some(utc(2, 13, 0))),
        record(2, "radical", Some(utc(2, 19, 0))),
        record(3, "kana_vocabulary", Some(utc(3, 1, 0))),
        record(4, "kanji", None),
        record(5, "unknown", Some(utc(2, 14, 0))),
    ]);
    assert_eq!(accepted, 3);
    assert_eq!(engine.items().len(), 3);
    assert_eq!(engine.total_reviews(), 3);
    assert_eq!(engine.buckets().buckets()[0].stats.count, 1);
    assert_eq!(engine.buckets().buckets()[1].stats.count, 1);
    assert_eq!(engine.buckets().buckets()[2].stats.by_category, [0, 0, 1]);

    engine.render().expect("render should succeed");
    assert_eq!(engine.renderer().frames_rendered, 1);
}

#[test]
fn typed_items_that_skip_the_constructor_are_still_checked() {
    let clock = FixedClock::new(utc(2, 12, 20));
    let mut engine = TimelineEngine::new(
        NullRenderer::default(),
        &clock,
        TimelineConfig::new(Viewport::new(848, 100)),
    )
    .expect("engine init");

    let items: Vec<ReviewItem> = serde_json::from_str(
        r#"[
            {"id": 1, "subject_type": "kanji", "slug": "a", "level": 4, "stage": 0,
             "available_at": "2024-05-02T13:00:00Z"},
            {"id": 2, "subject_type": "kanji", "slug": "b", "level": 0, "stage": 3,
             "available_at": "2024-05-02T13:00:00Z"},
            {"id": 3, "subject_type": "radical", "slug": "c", "level": 4, "stage": 12,
             "available_at": "2024-05-02T13:00:00Z"},
            {"id": 4, "subject_type": "radical", "slug": "d", "level": 4, "stage": 9,
             "available_at": "2024-05-02T13:00:00Z"}
        ]"#,
    )
    .expect("items should deserialize");
    assert_eq!(items[2].stage_name(), None);
    assert_eq!(items[3].stage_name(), Some("Burned"));

    let kept = engine.set_items(items);
    assert_eq!(kept, 1);
    assert_eq!(engine.items()[0].id, 4);
    assert_eq!(engine.total_reviews(), 1);
}

#[test]
fn window_changes_rebuild_with_a_new_scale() {
    let clock = FixedClock::new(utc(2, 12, 20));
    let mut engine = TimelineEngine::new(
        NullRenderer::default(),
        &clock,
        TimelineConfig::new(Viewport::new(848, 100)),
    )
    .expect("engine init");

    engine.set_window_days(0.25).expect("quarter day");
    assert_eq!(engine.scale().bucket_hours(), 1);
    assert_eq!(engine.buckets().total_hours(), 6);
    assert_eq!(engine.window_label(), "6 hours");

    engine.set_window_days(40.0).expect("clamped to max");
    assert_eq!(engine.config().days, 14.0);
    assert_eq!(engine.buckets().total_hours() % engine.scale().bucket_hours(), 0);
    assert!(engine.buckets().total_hours() >= 14 * 24);

    let err = engine.set_window_days(f64::NAN).expect_err("nan rejected");
    assert!(matches!(err, TimelineError::InvalidConfig(_)));
    assert_eq!(engine.config().days, 14.0);
}

#[test]
fn resize_rejects_degenerate_viewports_and_ignores_no_ops() {
    let clock = FixedClock::new(utc(2, 12, 20));
    let mut engine = TimelineEngine::new(
        NullRenderer::default(),
        &clock,
        TimelineConfig::new(Viewport::new(848, 100)),
    )
    .expect("engine init");

    let err = engine
        .resize(Viewport::new(0, 100))
        .expect_err("zero width rejected");
    assert!(matches!(err, TimelineError::InvalidViewport { width: 0, .. }));

    let ticket = engine.pending_refresh().expect("ticket");
    engine.resize(Viewport::new(848, 100)).expect("no-op resize");
    assert_eq!(engine.pending_refresh(), Some(ticket));

    engine.resize(Viewport::new(200, 100)).expect("narrow resize");
    assert_ne!(engine.pending_refresh(), Some(ticket));
    assert!(engine.scale().bucket_hours() >= 6);
}

#[test]
fn hourly_refresh_honors_only_the_current_ticket() {
    let clock = FixedClock::new(utc(2, 12, 20));
    let mut engine = TimelineEngine::new(
        NullRenderer::default(),
        &clock,
        TimelineConfig::new(Viewport::new(848, 100)),
    )
    .expect("engine init");

    let first = engine.pending_refresh().expect("initial ticket");
    assert_eq!(first.due_at, utc(2, 13, 0) + TimeDelta::seconds(1));

    engine.set_window_days(2.0).expect("two days");
    let second = engine.pending_refresh().expect("rescheduled ticket");
    assert_ne!(first.generation, second.generation);
    assert!(!engine.hourly_tick(first));

    clock.set(second.due_at);
    assert!(engine.hourly_tick(second));
    assert_eq!(engine.model().built_at, second.due_at);
    let third = engine.pending_refresh().expect("next ticket");
    assert_eq!(third.due_at, utc(2, 14, 0) + TimeDelta::seconds(1));
}

#[test]
fn rebuild_clears_a_committed_highlight() {
    let clock = FixedClock::new(utc(2, 12, 20));
    let mut engine = TimelineEngine::new(
        NullRenderer::default(),
        &clock,
        TimelineConfig::new(Viewport::new(848, 100)),
    )
    .expect("engine init");

    engine.pointer_down(133.0, 10.0);
    engine.pointer_up(373.0);
    assert_eq!(engine.highlight_phase(), HighlightPhase::Committed);

    engine.rebuild(RebuildTrigger::SettingsChanged);
    assert_eq!(engine.highlight_phase(), HighlightPhase::Idle);
    assert!(engine.frame().highlight.is_none());
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let clock = FixedClock::new(utc(2, 12, 20));
    let config = TimelineConfig::new(Viewport::new(848, 100)).with_user_level(0);
    let result = TimelineEngine::new(NullRenderer::default(), &clock, config);
    assert!(matches!(result, Err(TimelineError::InvalidConfig(_))));
}
