use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::stats::LEVEL_BAND_COUNT;
use crate::core::{
    AxisLayout, Bucket, BucketSet, BucketStats, CountAxis, GeometryMapper, ItemCategory,
    StageGroup, TicKind,
};
use crate::interaction::{BucketRange, HighlightPhase, HighlightState};
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::{BarStyle, PanelLayout};

const LABEL_PADDING_X_PX: f64 = 4.0;
const LABEL_PADDING_Y_PX: f64 = 8.0;
const LABEL_FONT_SIZE_PX: f64 = 11.0;
const BAR_GAP_PX: f64 = 3.0;
const MARKER_SIZE_PX: f64 = 6.0;
const CURRENT_MARKER_OFFSET_PX: f64 = 1.0;
const BURN_MARKER_OFFSET_PX: f64 = 8.0;

const GRID_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.15);
const RED_TIC_COLOR: Color = Color::hex(0xff2222);
const TEXT_COLOR: Color = Color::hex(0x000000);
const BACKGROUND_COLOR: Color =
    Color::rgba(221.0 / 255.0, 221.0 / 255.0, 221.0 / 255.0, 48.0 / 255.0);
const HIGHLIGHT_FILL: Color = Color::rgba(0.0, 161.0 / 255.0, 241.0 / 255.0, 0.1);
const HIGHLIGHT_EDGE: Color = Color::hex(0x00a1f1);
const CURRENT_MARKER_COLOR: Color = Color::hex(0xffffff);
const BURN_MARKER_COLOR: Color = Color::hex(0x000000);

/// Stack layer of a bar segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentSeries {
    Count,
    Category(ItemCategory),
    StageGroup(StageGroup),
    LevelBand(usize),
}

impl SegmentSeries {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Self::Count => Color::hex(0x778ad8),
            Self::Category(ItemCategory::Radical) => Color::hex(0x00a1f1),
            Self::Category(ItemCategory::Kanji) => Color::hex(0xf100a1),
            Self::Category(ItemCategory::Vocabulary) => Color::hex(0xa100f1),
            Self::StageGroup(StageGroup::Apprentice) => Color::hex(0xdd0093),
            Self::StageGroup(StageGroup::Guru) => Color::hex(0x882d9e),
            Self::StageGroup(StageGroup::Master) => Color::hex(0x294ddb),
            Self::StageGroup(StageGroup::Enlightened) => Color::hex(0x0093dd),
            Self::StageGroup(StageGroup::Burn) => Color::hex(0x434343),
            Self::LevelBand(band) => match band {
                0 => Color::hex(0x5eb6e8),
                1 => Color::hex(0xe25ebc),
                2 => Color::hex(0xaf79c3),
                3 => Color::hex(0x768ce7),
                4 => Color::hex(0x5e5e64),
                _ => Color::hex(0xf5c667),
            },
        }
    }
}

/// One stacked piece of a bar; `y` is the top edge in panel pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSegment {
    pub series: SegmentSeries,
    pub reviews: u32,
    pub y: f64,
    pub height: f64,
}

/// One histogram bar and its pointer hit box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineBar {
    pub bucket: usize,
    /// Hit box left edge and width in panel pixels.
    pub hit_x: f64,
    pub hit_width: f64,
    pub x: f64,
    pub width: f64,
    pub segments: SmallVec<[BarSegment; LEVEL_BAND_COUNT]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    CurrentLevel,
    Burn,
}

/// Triangle marker below a bar; `(x, y)` is its apex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineMarker {
    pub bucket: usize,
    pub kind: MarkerKind,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedTic {
    pub x: f64,
    pub kind: TicKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountTic {
    pub value: u32,
    pub y: f64,
    pub major: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedLabel {
    pub x: f64,
    pub y: f64,
    pub kind: TicKind,
    pub text: String,
}

/// Selected range or hover cursor along the top strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HighlightBand {
    Cursor { x: f64 },
    Range { range: BucketRange, x1: f64, x2: f64 },
}

/// Complete, backend-agnostic payload for one redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFrame {
    pub layout: PanelLayout,
    pub time_grid: Vec<PositionedTic>,
    pub time_labels: Vec<PositionedLabel>,
    pub count_grid: Vec<CountTic>,
    pub bars: Vec<TimelineBar>,
    pub markers: Vec<TimelineMarker>,
    pub highlight: Option<HighlightBand>,
}

/// Everything the frame builder reads; nothing here is mutated.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub layout: PanelLayout,
    pub buckets: &'a BucketSet,
    pub axis: &'a AxisLayout,
    pub count_axis: CountAxis,
    pub geometry: GeometryMapper,
    pub highlight: HighlightState,
    pub bar_style: BarStyle,
    pub max_bar_width: Option<u32>,
    pub show_current_level_markers: bool,
    pub show_burn_markers: bool,
}

#[must_use]
pub fn build_timeline_frame(inputs: &FrameInputs<'_>) -> TimelineFrame {
    let layout = inputs.layout;
    let geometry = inputs.geometry;
    let plot_height = layout.plot_height();
    let plot_bottom = layout.plot_bottom();
    let max_reviews = f64::from(inputs.count_axis.max_reviews.max(1));
    let px_per_review = plot_height / max_reviews;

    let count_grid = inputs
        .count_axis
        .tics()
        .map(|(value, major)| CountTic {
            value,
            y: plot_bottom - (plot_height * f64::from(value) / max_reviews).round(),
            major,
        })
        .collect();

    let time_grid = inputs
        .axis
        .grid
        .iter()
        .map(|tic| PositionedTic {
            x: layout.margin_left + geometry.hour_to_x(tic.position_hours),
            kind: tic.kind,
        })
        .collect();

    let time_labels = inputs
        .axis
        .labels
        .iter()
        .map(|label| PositionedLabel {
            x: layout.margin_left + geometry.hour_to_x(label.position_hours) + LABEL_PADDING_X_PX,
            y: layout.margin_top - LABEL_PADDING_Y_PX,
            kind: label.kind,
            text: label.text.clone(),
        })
        .collect();

    let min_bar_reviews = (max_reviews / plot_height).ceil() as u32;
    let mut bars = Vec::new();
    let mut markers = Vec::new();
    for (index, bucket) in inputs.buckets.buckets().iter().enumerate() {
        let (x1, x2) = bar_span(geometry, bucket, inputs.max_bar_width);

        let parts = bar_parts(&bucket.stats, inputs.bar_style);
        if !parts.is_empty() {
            bars.push(TimelineBar {
                bucket: index,
                hit_x: layout.margin_left + x1,
                hit_width: x2 - x1,
                x: layout.margin_left + x1 + 1.0,
                width: (x2 - x1 - BAR_GAP_PX).max(0.0),
                segments: stack_segments(&parts, min_bar_reviews, plot_bottom, px_per_review),
            });
        }

        let marker_x = layout.margin_left + ((x1 + x2) / 2.0).floor();
        if inputs.show_current_level_markers && bucket.stats.has_current_level_marker {
            markers.push(TimelineMarker {
                bucket: index,
                kind: MarkerKind::CurrentLevel,
                x: marker_x,
                y: plot_bottom + CURRENT_MARKER_OFFSET_PX,
            });
        }
        if inputs.show_burn_markers && bucket.stats.burn_count > 0 {
            markers.push(TimelineMarker {
                bucket: index,
                kind: MarkerKind::Burn,
                x: marker_x,
                y: plot_bottom + BURN_MARKER_OFFSET_PX,
            });
        }
    }

    TimelineFrame {
        layout,
        time_grid,
        time_labels,
        count_grid,
        bars,
        markers,
        highlight: highlight_band(inputs),
    }
}

/// Axis-relative `[x1, x2)` of a bucket's bar, narrowed to `max_bar_width`.
#[must_use]
pub(super) fn bar_span(
    geometry: GeometryMapper,
    bucket: &Bucket,
    max_bar_width: Option<u32>,
) -> (f64, f64) {
    let x1 = geometry.hour_to_x(f64::from(bucket.start_hour));
    let x2 = geometry.hour_to_x(f64::from(bucket.end_hour));
    match max_bar_width {
        Some(cap) => (x1, x2.min(x1 + f64::from(cap))),
        None => (x1, x2),
    }
}

fn bar_parts(
    stats: &BucketStats,
    style: BarStyle,
) -> SmallVec<[(SegmentSeries, u32); LEVEL_BAND_COUNT]> {
    let mut parts = SmallVec::new();
    match style {
        BarStyle::Count => parts.push((SegmentSeries::Count, stats.count)),
        BarStyle::ItemType => parts.extend(
            ItemCategory::ALL
                .into_iter()
                .map(|category| (SegmentSeries::Category(category), stats.category(category))),
        ),
        BarStyle::SrsStage => parts.extend(
            StageGroup::ALL
                .into_iter()
                .map(|group| (SegmentSeries::StageGroup(group), stats.stage_group(group))),
        ),
        BarStyle::Level => parts.extend(
            stats
                .by_level_band
                .iter()
                .enumerate()
                .map(|(band, count)| (SegmentSeries::LevelBand(band), *count)),
        ),
    }
    parts.retain(|(_, count)| *count > 0);
    parts
}

/// Stacks parts bottom-up; the top part is stretched to the minimum visible
/// height.
fn stack_segments(
    parts: &[(SegmentSeries, u32)],
    min_bar_reviews: u32,
    plot_bottom: f64,
    px_per_review: f64,
) -> SmallVec<[BarSegment; LEVEL_BAND_COUNT]> {
    let mut segments = SmallVec::new();
    let mut offset = 0_u32;
    for (index, (series, reviews)) in parts.iter().copied().enumerate() {
        let mut height = reviews;
        if index + 1 == parts.len() && offset + height < min_bar_reviews {
            height = min_bar_reviews - offset;
        }
        let top = offset + height;
        segments.push(BarSegment {
            series,
            reviews,
            y: plot_bottom - f64::from(top) * px_per_review,
            height: f64::from(height) * px_per_review,
        });
        offset = top;
    }
    segments
}

fn highlight_band(inputs: &FrameInputs<'_>) -> Option<HighlightBand> {
    let to_x = |boundary: usize| {
        inputs.layout.margin_left + inputs.geometry.boundary_to_x(inputs.buckets, boundary)
    };
    match inputs.highlight.phase() {
        HighlightPhase::Dragging | HighlightPhase::Committed => {
            let range = inputs.highlight.selection()?.range();
            Some(HighlightBand::Range {
                range,
                x1: to_x(range.start),
                x2: to_x(range.end),
            })
        }
        HighlightPhase::Idle => inputs
            .highlight
            .hover_boundary()
            .map(|boundary| HighlightBand::Cursor { x: to_x(boundary) }),
    }
}

impl TimelineFrame {
    /// Flattens the payload into generic primitives for a `Renderer`.
    #[must_use]
    pub fn to_render_frame(&self) -> RenderFrame {
        let layout = self.layout;
        let plot_width = layout.plot_width();
        let plot_bottom = layout.plot_bottom();
        let mut frame = RenderFrame::new(layout.viewport);

        frame.rects.push(RectPrimitive::new(
            layout.margin_left,
            layout.margin_top,
            plot_width,
            layout.plot_height(),
            BACKGROUND_COLOR,
        ));

        for tic in self.count_grid.iter().filter(|tic| tic.value > 0) {
            frame.lines.push(LinePrimitive::new(
                layout.margin_left,
                tic.y,
                layout.margin_left + plot_width,
                tic.y,
                1.0,
                GRID_COLOR,
            ));
        }
        for tic in &self.count_grid {
            frame.texts.push(TextPrimitive::new(
                tic.value.to_string(),
                layout.margin_left - LABEL_PADDING_X_PX,
                tic.y,
                LABEL_FONT_SIZE_PX,
                TEXT_COLOR,
                TextHAlign::Right,
            ));
        }

        for tic in &self.time_grid {
            let (top, color) = match tic.kind {
                TicKind::Red => (0.0, RED_TIC_COLOR),
                TicKind::Major => (0.0, GRID_COLOR),
                TicKind::Minor => (layout.margin_top - (LABEL_PADDING_Y_PX - 2.0), GRID_COLOR),
            };
            frame
                .lines
                .push(LinePrimitive::new(tic.x, top, tic.x, plot_bottom - 1.0, 1.0, color));
        }
        for label in &self.time_labels {
            let color = if label.kind == TicKind::Red {
                RED_TIC_COLOR
            } else {
                TEXT_COLOR
            };
            frame.texts.push(TextPrimitive::new(
                label.text.clone(),
                label.x,
                label.y,
                LABEL_FONT_SIZE_PX,
                color,
                TextHAlign::Left,
            ));
        }

        for bar in &self.bars {
            for segment in &bar.segments {
                frame.rects.push(RectPrimitive::new(
                    bar.x,
                    segment.y,
                    bar.width,
                    segment.height,
                    segment.series.color(),
                ));
            }
        }

        for marker in &self.markers {
            let color = match marker.kind {
                MarkerKind::CurrentLevel => CURRENT_MARKER_COLOR,
                MarkerKind::Burn => BURN_MARKER_COLOR,
            };
            frame.rects.push(RectPrimitive::new(
                marker.x - MARKER_SIZE_PX / 2.0,
                marker.y,
                MARKER_SIZE_PX,
                MARKER_SIZE_PX,
                color,
            ));
        }

        match self.highlight {
            Some(HighlightBand::Range { x1, x2, .. }) => {
                frame.rects.push(RectPrimitive::new(
                    x1,
                    layout.margin_top,
                    x2 - x1,
                    layout.plot_height(),
                    HIGHLIGHT_FILL,
                ));
                for x in [x1, x2] {
                    frame.lines.push(highlight_edge(x, layout.margin_top - 1.0, plot_bottom));
                }
            }
            Some(HighlightBand::Cursor { x }) => {
                frame
                    .lines
                    .push(highlight_edge(x, layout.margin_top - 1.0, plot_bottom));
            }
            None => {}
        }

        frame
    }
}

fn highlight_edge(x: f64, top: f64, bottom: f64) -> LinePrimitive {
    LinePrimitive::new(x, top, x, bottom, 2.0, HIGHLIGHT_EDGE)
}
