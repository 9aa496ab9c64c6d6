mod engine;
mod engine_config;
mod interaction_controller;
mod json_contract;
mod panel_layout;
mod render_frame_builder;
mod review_summary;
mod timeline_model;
mod validation;

pub use engine::TimelineEngine;
pub use engine_config::{
    BarStyle, DEFAULT_MAX_BAR_WIDTH_PX, DEFAULT_MAX_DAYS, DEFAULT_WINDOW_DAYS,
    MAX_WINDOW_DAYS_CEILING, MIN_WINDOW_DAYS, ReviewDetailsMode, TimelineConfig,
    window_hours_for_days,
};
pub use interaction_controller::ReviewInfoEvent;
pub use json_contract::{
    RANGE_SUMMARY_JSON_SCHEMA_V1, RangeSummaryJsonContractV1, TIMELINE_CONFIG_JSON_SCHEMA_V1,
    TimelineConfigJsonContractV1,
};
pub use panel_layout::{
    DEFAULT_MARGIN_LEFT_PX, PANEL_MARGIN_BOTTOM_PX, PANEL_MARGIN_TOP_PX, PanelLayout,
    scale_axis_width,
};
pub use render_frame_builder::{
    BarSegment, CountTic, FrameInputs, HighlightBand, MarkerKind, PositionedLabel, PositionedTic,
    SegmentSeries, TimelineBar, TimelineFrame, TimelineMarker, build_timeline_frame,
};
pub use review_summary::{RangeSummary, SummaryContext, SummaryRow, window_label};
pub use timeline_model::{RebuildTrigger, TimelineModel};
