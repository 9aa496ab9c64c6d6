use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use review_timeline::core::{
    BucketRequest, ItemCategory, MarkerCategories, ReviewItem, StatsPolicy, SubjectType,
    ViewerTimeZone, aggregate, bucketize, sort_by_due_time,
};

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0)
        .single()
        .expect("valid time")
}

fn item(id: u64, subject: SubjectType, slug: &str, level: u32, due_hours: i64) -> ReviewItem {
    ReviewItem::new(id, subject, slug, level, 3, noon() + TimeDelta::hours(due_hours))
        .expect("valid item")
}

/// Deliberately shuffled across categories, levels and due times.
fn shuffled_inventory() -> Vec<ReviewItem> {
    vec![
        item(1, SubjectType::Vocabulary, "taberu", 3, 20),
        item(2, SubjectType::Kanji, "mizu", 5, 1),
        item(3, SubjectType::KanaVocabulary, "sore", 2, 9),
        item(4, SubjectType::Kanji, "Nagare", 5, 30),
        item(5, SubjectType::Radical, "ground", 4, 14),
        item(6, SubjectType::Kanji, "ki", 5, 2),
        item(7, SubjectType::Kanji, "hi", 2, 40),
        item(8, SubjectType::Kanji, "Ki", 5, 7),
    ]
}

fn display_keys(items: &[ReviewItem]) -> Vec<(ItemCategory, u32, &str)> {
    items
        .iter()
        .map(|item| (item.category(), item.level, item.slug.as_str()))
        .collect()
}

const EXPECTED: [(ItemCategory, u32, &str); 8] = [
    (ItemCategory::Radical, 4, "ground"),
    (ItemCategory::Kanji, 2, "hi"),
    (ItemCategory::Kanji, 5, "Ki"),
    (ItemCategory::Kanji, 5, "ki"),
    (ItemCategory::Kanji, 5, "mizu"),
    (ItemCategory::Kanji, 5, "Nagare"),
    (ItemCategory::Vocabulary, 2, "sore"),
    (ItemCategory::Vocabulary, 3, "taberu"),
];

#[test]
fn aggregate_orders_by_category_then_level_then_slug() {
    let mut items = shuffled_inventory();
    let stats = aggregate(&mut items, &StatsPolicy::default());
    assert_eq!(display_keys(&items), EXPECTED);
    assert_eq!(stats.count, 8);
    assert_eq!(stats.category(ItemCategory::Vocabulary), 2);

    items.reverse();
    aggregate(&mut items, &StatsPolicy::default());
    assert_eq!(display_keys(&items), EXPECTED);
}

#[test]
fn range_aggregation_reorders_items_from_several_buckets() {
    let mut items = shuffled_inventory();
    sort_by_due_time(&mut items);
    let policy = StatsPolicy::default();
    let buckets = bucketize(
        &items,
        BucketRequest {
            now: noon(),
            timezone: ViewerTimeZone::Utc,
            bucket_hours: 6,
            window_hours: 84,
        },
        &policy,
    );
    assert!(buckets.buckets().iter().filter(|b| !b.items.is_empty()).count() > 3);

    let (range_items, stats) = buckets.aggregate_range(0..buckets.len(), &policy);
    assert_eq!(display_keys(&range_items), EXPECTED);
    assert_eq!(stats.count, 8);
}

#[test]
fn radical_kanji_markers_count_vocabulary_without_raising_the_marker() {
    let policy = StatsPolicy {
        user_level: 3,
        marker_categories: MarkerCategories::RadicalKanji,
        ..StatsPolicy::default()
    };

    let mut vocabulary_only = vec![item(1, SubjectType::Vocabulary, "taberu", 3, 1)];
    let stats = aggregate(&mut vocabulary_only, &policy);
    assert_eq!(stats.current_level_count, 1);
    assert!(!stats.has_current_level_marker);

    let mut with_kanji = vec![
        item(1, SubjectType::Vocabulary, "taberu", 3, 1),
        item(2, SubjectType::Kanji, "shoku", 3, 1),
    ];
    let stats = aggregate(&mut with_kanji, &policy);
    assert_eq!(stats.current_level_count, 2);
    assert!(stats.has_current_level_marker);

    let hidden = StatsPolicy {
        marker_categories: MarkerCategories::None,
        ..policy
    };
    let stats = aggregate(&mut with_kanji, &hidden);
    assert_eq!(stats.current_level_count, 2);
    assert!(!stats.has_current_level_marker);
}
