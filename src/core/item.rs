use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TimelineError, TimelineResult};

/// Names of the ten progression stages, indexed by stage number.
pub const SRS_STAGE_NAMES: [&str; 10] = [
    "Initiate",
    "Apprentice 1",
    "Apprentice 2",
    "Apprentice 3",
    "Apprentice 4",
    "Guru 1",
    "Guru 2",
    "Master",
    "Enlightened",
    "Burned",
];

pub const MIN_SCHEDULED_STAGE: u8 = 1;
pub const MAX_STAGE: u8 = 9;
/// A correct answer at this stage burns the item.
pub const BURN_ELIGIBLE_STAGE: u8 = 8;

/// Aggregation category. Declaration order is the display sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Radical,
    Kanji,
    Vocabulary,
}

impl ItemCategory {
    pub const ALL: [Self; 3] = [Self::Radical, Self::Kanji, Self::Vocabulary];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Radical => 0,
            Self::Kanji => 1,
            Self::Vocabulary => 2,
        }
    }

    #[must_use]
    pub fn plural_label(self) -> &'static str {
        match self {
            Self::Radical => "radicals",
            Self::Kanji => "kanji",
            Self::Vocabulary => "vocabulary",
        }
    }
}

/// Subject type as reported by the item source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    Radical,
    Kanji,
    Vocabulary,
    KanaVocabulary,
}

impl SubjectType {
    #[must_use]
    pub fn category(self) -> ItemCategory {
        match self {
            Self::Radical => ItemCategory::Radical,
            Self::Kanji => ItemCategory::Kanji,
            Self::Vocabulary | Self::KanaVocabulary => ItemCategory::Vocabulary,
        }
    }
}

impl FromStr for SubjectType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "radical" => Ok(Self::Radical),
            "kanji" => Ok(Self::Kanji),
            "vocabulary" => Ok(Self::Vocabulary),
            "kana_vocabulary" => Ok(Self::KanaVocabulary),
            _ => Err(()),
        }
    }
}

/// Raw record delivered by the item source before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: u64,
    pub object: String,
    pub slug: String,
    pub level: u32,
    pub srs_stage: u8,
    #[serde(default)]
    pub available_at: Option<DateTime<Utc>>,
}

/// A scheduled review unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub id: u64,
    pub subject_type: SubjectType,
    pub slug: String,
    pub level: u32,
    pub stage: u8,
    pub available_at: DateTime<Utc>,
}

impl ReviewItem {
    pub fn new(
        id: u64,
        subject_type: SubjectType,
        slug: impl Into<String>,
        level: u32,
        stage: u8,
        available_at: DateTime<Utc>,
    ) -> TimelineResult<Self> {
        let item = Self {
            id,
            subject_type,
            slug: slug.into(),
            level,
            stage,
            available_at,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks the stage and level rules `new` enforces.
    ///
    /// Items built field by field or deserialized directly bypass `new`.
    pub fn validate(&self) -> TimelineResult<()> {
        if !(MIN_SCHEDULED_STAGE..=MAX_STAGE).contains(&self.stage) {
            return Err(TimelineError::RejectedItem {
                id: self.id,
                reason: "stage must be in 1..=9",
            });
        }
        if self.level == 0 {
            return Err(TimelineError::RejectedItem {
                id: self.id,
                reason: "level must be >= 1",
            });
        }
        Ok(())
    }

    pub fn try_from_record(record: ItemRecord) -> TimelineResult<Self> {
        let Some(available_at) = record.available_at else {
            return Err(TimelineError::RejectedItem {
                id: record.id,
                reason: "missing available_at",
            });
        };
        let subject_type =
            record
                .object
                .parse::<SubjectType>()
                .map_err(|()| TimelineError::RejectedItem {
                    id: record.id,
                    reason: "unrecognized category",
                })?;

        Self::new(
            record.id,
            subject_type,
            record.slug,
            record.level,
            record.srs_stage,
            available_at,
        )
    }

    #[must_use]
    pub fn category(&self) -> ItemCategory {
        self.subject_type.category()
    }

    /// `None` for stages outside the named range.
    #[must_use]
    pub fn stage_name(&self) -> Option<&'static str> {
        SRS_STAGE_NAMES.get(usize::from(self.stage)).copied()
    }
}

/// Validates raw records and returns the scheduled items sorted by due time.
///
/// Records that fail validation are dropped.
pub fn prepare_items<I>(records: I) -> Vec<ReviewItem>
where
    I: IntoIterator<Item = ItemRecord>,
{
    let mut rejected = 0_usize;
    let mut items: Vec<ReviewItem> = records
        .into_iter()
        .filter_map(|record| match ReviewItem::try_from_record(record) {
            Ok(item) => Some(item),
            Err(err) => {
                rejected += 1;
                debug!(error = %err, "dropping item record");
                None
            }
        })
        .collect();

    sort_by_due_time(&mut items);
    debug!(accepted = items.len(), rejected, "prepared item inventory");
    items
}

/// Stable ascending sort by `available_at`, ties broken by id.
pub fn sort_by_due_time(items: &mut [ReviewItem]) {
    items.sort_by(|left, right| {
        left.available_at
            .cmp(&right.available_at)
            .then(left.id.cmp(&right.id))
    });
}
