use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use review_timeline::api::{
    HighlightBand, ReviewDetailsMode, ReviewInfoEvent, TimelineConfig, TimelineEngine,
};
use review_timeline::core::{FixedClock, ReviewItem, SubjectType, Viewport};
use review_timeline::interaction::{BucketRange, HighlightPhase};
use review_timeline::render::NullRenderer;

// 848px wide with a one-digit count axis: margin 8, 10px per hour over 84h.
const MARGIN: f64 = 8.0;
const STRIP_Y: f64 = 10.0;
const PLOT_Y: f64 = 50.0;

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0)
        .single()
        .expect("valid time")
}

fn engine(clock: &FixedClock, config: TimelineConfig) -> TimelineEngine<NullRenderer, &FixedClock> {
    TimelineEngine::new(NullRenderer::default(), clock, config).expect("engine init")
}

fn default_config() -> TimelineConfig {
    TimelineConfig::new(Viewport::new(848, 100))
}

fn shown(event: ReviewInfoEvent) -> (BucketRange, bool) {
    match event {
        ReviewInfoEvent::Show(summary) => (summary.range, summary.sticky),
        other => panic!("expected Show, got {other:?}"),
    }
}

#[test]
fn zero_width_drag_clears_and_returns_to_idle() {
    let clock = FixedClock::new(noon());
    let mut engine = engine(&clock, default_config());

    assert_eq!(engine.pointer_down(MARGIN + 125.0, STRIP_Y), ReviewInfoEvent::Unchanged);
    assert_eq!(engine.highlight_phase(), HighlightPhase::Dragging);
    assert_eq!(engine.pointer_up(MARGIN + 125.0), ReviewInfoEvent::Hide);
    assert_eq!(engine.highlight_phase(), HighlightPhase::Idle);
    assert!(engine.frame().highlight.is_none());
}

#[test]
fn drag_previews_then_commits_a_sticky_range() {
    let clock = FixedClock::new(noon());
    let mut engine = engine(&clock, default_config());

    engine.pointer_down(MARGIN + 125.0, STRIP_Y);
    let (range, sticky) = shown(engine.pointer_move(MARGIN + 365.0, STRIP_Y));
    assert_eq!(range, BucketRange { start: 2, end: 6 });
    assert!(!sticky);

    // Dragging continues outside the strip.
    let (range, _) = shown(engine.pointer_move(MARGIN + 55.0, 90.0));
    assert_eq!(range, BucketRange { start: 1, end: 2 });
    assert_eq!(engine.pointer_leave(), ReviewInfoEvent::Unchanged);

    let (range, sticky) = shown(engine.pointer_up(MARGIN + 365.0));
    assert_eq!(range, BucketRange { start: 2, end: 6 });
    assert!(sticky);
    assert_eq!(engine.highlight_phase(), HighlightPhase::Committed);
    assert_eq!(
        engine.frame().highlight,
        Some(HighlightBand::Range {
            range: BucketRange { start: 2, end: 6 },
            x1: MARGIN + 120.0,
            x2: MARGIN + 360.0,
        })
    );

    assert_eq!(engine.pointer_move(MARGIN + 500.0, STRIP_Y), ReviewInfoEvent::Unchanged);
    assert_eq!(engine.click(MARGIN + 500.0, 95.0), ReviewInfoEvent::Hide);
    assert_eq!(engine.highlight_phase(), HighlightPhase::Idle);
}

#[test]
fn hovering_the_strip_draws_a_cursor_at_the_nearest_boundary() {
    let clock = FixedClock::new(noon());
    let mut engine = engine(&clock, default_config());

    assert_eq!(engine.pointer_move(MARGIN + 95.0, STRIP_Y), ReviewInfoEvent::Unchanged);
    assert_eq!(
        engine.frame().highlight,
        Some(HighlightBand::Cursor { x: MARGIN + 120.0 })
    );
    assert_eq!(engine.pointer_leave(), ReviewInfoEvent::Hide);
    assert!(engine.frame().highlight.is_none());
}

#[test]
fn bars_preview_on_hover_and_commit_on_click() {
    let clock = FixedClock::new(noon());
    let mut engine = engine(&clock, default_config());
    let due = noon() + TimeDelta::hours(19);
    engine.set_items(vec![
        ReviewItem::new(1, SubjectType::Kanji, "a", 1, 2, due).expect("valid item"),
        ReviewItem::new(2, SubjectType::Radical, "b", 1, 2, due).expect("valid item"),
    ]);

    // Bucket 3 spans hours 18..24; its bar is capped at 40px.
    assert_eq!(engine.bar_at(MARGIN + 200.0, PLOT_Y), Some(3));
    assert_eq!(engine.bar_at(MARGIN + 225.0, PLOT_Y), None);
    assert_eq!(engine.bar_at(MARGIN + 200.0, STRIP_Y), None);

    let event = engine.pointer_move(MARGIN + 200.0, PLOT_Y);
    let ReviewInfoEvent::Show(summary) = event else {
        panic!("expected bar preview");
    };
    assert_eq!(summary.range, BucketRange::single(3));
    assert_eq!(summary.stats.count, 2);
    assert!(!summary.sticky);
    assert_eq!(summary.items.len(), 2);

    assert_eq!(engine.pointer_move(MARGIN + 205.0, PLOT_Y), ReviewInfoEvent::Unchanged);
    assert_eq!(engine.pointer_move(MARGIN + 300.0, PLOT_Y), ReviewInfoEvent::Hide);

    let (range, sticky) = shown(engine.click(MARGIN + 200.0, PLOT_Y));
    assert_eq!(range, BucketRange::single(3));
    assert!(sticky);
    assert_eq!(engine.pointer_move(MARGIN + 300.0, PLOT_Y), ReviewInfoEvent::Unchanged);
    assert_eq!(engine.pointer_leave(), ReviewInfoEvent::Unchanged);
    assert_eq!(engine.highlight_phase(), HighlightPhase::Committed);
}

#[test]
fn clicks_inside_the_strip_do_not_dismiss_a_committed_range() {
    let clock = FixedClock::new(noon());
    let mut engine = engine(&clock, default_config());

    engine.pointer_down(MARGIN + 125.0, STRIP_Y);
    engine.pointer_up(MARGIN + 365.0);
    assert_eq!(engine.click(MARGIN + 365.0, STRIP_Y), ReviewInfoEvent::Unchanged);
    assert_eq!(engine.highlight_phase(), HighlightPhase::Committed);
}

#[test]
fn disabled_review_details_ignore_pointer_input() {
    let clock = FixedClock::new(noon());
    let config = default_config().with_review_details(ReviewDetailsMode::None);
    let mut engine = engine(&clock, config);

    assert_eq!(engine.pointer_down(MARGIN + 125.0, STRIP_Y), ReviewInfoEvent::Unchanged);
    assert_eq!(engine.pointer_move(MARGIN + 365.0, STRIP_Y), ReviewInfoEvent::Unchanged);
    assert_eq!(engine.highlight_phase(), HighlightPhase::Idle);
}

#[test]
fn summary_mode_omits_the_item_list() {
    let clock = FixedClock::new(noon());
    let config = default_config().with_review_details(ReviewDetailsMode::Summary);
    let mut engine = engine(&clock, config);
    engine.set_items(vec![
        ReviewItem::new(1, SubjectType::Vocabulary, "a", 2, 5, noon()).expect("valid item"),
    ]);

    let summary = engine.range_summary(BucketRange::single(0), false);
    assert_eq!(summary.stats.count, 1);
    assert!(summary.items.is_empty());
}
