pub mod axis;
pub mod bucketizer;
pub mod clock;
pub mod count_axis;
pub mod geometry;
pub mod item;
pub mod labels;
pub mod primitives;
pub mod refresh;
pub mod scale_tier;
pub mod stats;
pub mod types;

pub use axis::{
    AxisLabel, AxisLayout, AxisRequest, GridTic, LabelCollisionPolicy, TicKind, generate_axis,
};
pub use bucketizer::{
    Bucket, BucketRequest, BucketSet, MAX_BUCKET_HOURS, bucketize, window_anchor,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use count_axis::CountAxis;
pub use geometry::GeometryMapper;
pub use item::{
    BURN_ELIGIBLE_STAGE, ItemCategory, ItemRecord, ReviewItem, SRS_STAGE_NAMES, SubjectType,
    prepare_items, sort_by_due_time,
};
pub use labels::{LabelGenerator, TicSpec, TimeFormat};
pub use refresh::{RefreshSchedule, RefreshTicket, next_refresh_at};
pub use scale_tier::{
    DEFAULT_MIN_PX_PER_LABEL, DEFAULT_SCALE_TIERS, ScaleSelection, ScaleTier, select_scale,
};
pub use stats::{
    BucketStats, MarkerCategories, SrsDisplayMode, StageGroup, StatsPolicy, aggregate,
    level_band, level_band_label, sort_for_display,
};
pub use types::{MIN_AXIS_WIDTH_PX, ViewerTimeZone, Viewport};
