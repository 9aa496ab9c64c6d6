use serde::{Deserialize, Serialize};

use crate::core::item::{BURN_ELIGIBLE_STAGE, ItemCategory, ReviewItem};

pub const LEVEL_BAND_COUNT: usize = 6;
pub const LEVELS_PER_BAND: u32 = 10;

/// Whether stages are grouped by the item's current stage or the stage a
/// correct answer would promote it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SrsDisplayMode {
    #[default]
    Current,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageGroup {
    Apprentice,
    Guru,
    Master,
    Enlightened,
    Burn,
}

impl StageGroup {
    pub const ALL: [Self; 5] = [
        Self::Apprentice,
        Self::Guru,
        Self::Master,
        Self::Enlightened,
        Self::Burn,
    ];

    /// Maps a live stage (1..=9) to its display group.
    #[must_use]
    pub fn for_stage(stage: u8, mode: SrsDisplayMode) -> Self {
        match (mode, stage) {
            (SrsDisplayMode::Current, 0..=4) => Self::Apprentice,
            (SrsDisplayMode::Current, 5 | 6) => Self::Guru,
            (SrsDisplayMode::Current, 7) => Self::Master,
            (SrsDisplayMode::Current, 8) => Self::Enlightened,
            (SrsDisplayMode::Next, 0..=3) => Self::Apprentice,
            (SrsDisplayMode::Next, 4 | 5) => Self::Guru,
            (SrsDisplayMode::Next, 6) => Self::Master,
            (SrsDisplayMode::Next, 7) => Self::Enlightened,
            (_, _) => Self::Burn,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Apprentice => "apprentice",
            Self::Guru => "guru",
            Self::Master => "master",
            Self::Enlightened => "enlightened",
            Self::Burn => "burn",
        }
    }
}

/// Level band index: 1-10 → 0, 11-20 → 1, ... 51+ → 5.
#[must_use]
pub fn level_band(level: u32) -> usize {
    let band = (level.max(1) - 1) / LEVELS_PER_BAND;
    (band as usize).min(LEVEL_BAND_COUNT - 1)
}

#[must_use]
pub fn level_band_label(band: usize) -> String {
    let first = band as u32 * LEVELS_PER_BAND + 1;
    if band + 1 >= LEVEL_BAND_COUNT {
        format!("levels {first}+")
    } else {
        format!("levels {first}-{}", first + LEVELS_PER_BAND - 1)
    }
}

/// Categories whose current-level items raise the current-level marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerCategories {
    None,
    RadicalKanji,
    #[default]
    RadicalKanjiVocabulary,
}

impl MarkerCategories {
    #[must_use]
    pub fn contains(self, category: ItemCategory) -> bool {
        match self {
            Self::None => false,
            Self::RadicalKanji => category != ItemCategory::Vocabulary,
            Self::RadicalKanjiVocabulary => true,
        }
    }
}

/// Settings that shape aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatsPolicy {
    pub srs_display: SrsDisplayMode,
    pub user_level: u32,
    pub marker_categories: MarkerCategories,
}

impl Default for StatsPolicy {
    fn default() -> Self {
        Self {
            srs_display: SrsDisplayMode::Current,
            user_level: 1,
            marker_categories: MarkerCategories::RadicalKanjiVocabulary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BucketStats {
    pub count: u32,
    pub by_category: [u32; 3],
    pub by_stage_group: [u32; 5],
    pub by_level_band: [u32; LEVEL_BAND_COUNT],
    pub current_level_count: u32,
    pub has_current_level_marker: bool,
    pub burn_count: u32,
}

impl BucketStats {
    #[must_use]
    pub fn category(&self, category: ItemCategory) -> u32 {
        self.by_category[category.index()]
    }

    #[must_use]
    pub fn stage_group(&self, group: StageGroup) -> u32 {
        self.by_stage_group[group.index()]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn record(&mut self, item: &ReviewItem, policy: &StatsPolicy) {
        let category = item.category();
        self.count += 1;
        self.by_category[category.index()] += 1;
        self.by_stage_group[StageGroup::for_stage(item.stage, policy.srs_display).index()] += 1;
        self.by_level_band[level_band(item.level)] += 1;
        if item.level == policy.user_level {
            self.current_level_count += 1;
            if policy.marker_categories.contains(category) {
                self.has_current_level_marker = true;
            }
        }
        if item.stage == BURN_ELIGIBLE_STAGE {
            self.burn_count += 1;
        }
    }
}

/// Display order: category, then level, then slug, then id.
///
/// Slugs compare case-insensitively first; exact byte order only breaks ties.
pub fn sort_for_display(items: &mut [ReviewItem]) {
    items.sort_by(|left, right| {
        left.category()
            .cmp(&right.category())
            .then(left.level.cmp(&right.level))
            .then_with(|| folded(&left.slug).cmp(folded(&right.slug)))
            .then_with(|| left.slug.cmp(&right.slug))
            .then(left.id.cmp(&right.id))
    });
}

fn folded(slug: &str) -> impl Iterator<Item = char> + '_ {
    slug.chars().flat_map(char::to_lowercase)
}

/// Sorts `items` into display order and tallies them in a single pass.
pub fn aggregate(items: &mut [ReviewItem], policy: &StatsPolicy) -> BucketStats {
    sort_for_display(items);
    let mut stats = BucketStats::default();
    for item in items.iter() {
        stats.record(item, policy);
    }
    stats
}
