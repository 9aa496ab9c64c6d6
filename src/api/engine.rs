use tracing::{debug, trace, warn};

use crate::core::{
    AxisLayout, BucketSet, Clock, ItemRecord, MarkerCategories, RefreshSchedule, RefreshTicket,
    ReviewItem, ScaleSelection, Viewport, prepare_items, sort_by_due_time,
};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::HighlightState;
use crate::render::Renderer;

use super::render_frame_builder::{FrameInputs, build_timeline_frame};
use super::review_summary::window_label;
use super::validation::validate_window_days;
use super::{RebuildTrigger, TimelineConfig, TimelineFrame, TimelineModel};

/// Main orchestration facade consumed by host applications.
///
/// Owns the item inventory, the derived `TimelineModel`, the highlight state
/// and the hourly refresh ticket. Every rebuild trigger goes through
/// `rebuild`, which replaces the model, clears any highlight and reissues the
/// refresh ticket.
pub struct TimelineEngine<R: Renderer, C: Clock> {
    pub(super) renderer: R,
    pub(super) clock: C,
    pub(super) config: TimelineConfig,
    pub(super) items: Vec<ReviewItem>,
    pub(super) model: TimelineModel,
    pub(super) highlight: HighlightState,
    pub(super) hovered_bar: Option<usize>,
    pub(super) refresh: RefreshSchedule,
}

impl<R: Renderer, C: Clock> TimelineEngine<R, C> {
    /// Creates an engine with an empty inventory.
    pub fn new(renderer: R, clock: C, config: TimelineConfig) -> TimelineResult<Self> {
        let config = config.validate()?;
        let now = clock.now();
        let model = TimelineModel::build(&config, &[], now);
        let mut refresh = RefreshSchedule::default();
        let ticket = refresh.reschedule(now);
        debug!(
            trigger = RebuildTrigger::Init.as_str(),
            window_hours = model.buckets.total_hours(),
            bucket_hours = model.buckets.bucket_hours(),
            buckets = model.buckets.len(),
            next_refresh = %ticket.due_at,
            "timeline initialized"
        );
        Ok(Self {
            renderer,
            clock,
            config,
            items: Vec::new(),
            model,
            highlight: HighlightState::default(),
            hovered_bar: None,
            refresh,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &TimelineModel {
        &self.model
    }

    #[must_use]
    pub fn buckets(&self) -> &BucketSet {
        &self.model.buckets
    }

    #[must_use]
    pub fn scale(&self) -> ScaleSelection {
        self.model.scale
    }

    #[must_use]
    pub fn axis(&self) -> &AxisLayout {
        &self.model.axis
    }

    #[must_use]
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    #[must_use]
    pub fn highlight_state(&self) -> HighlightState {
        self.highlight
    }

    /// Reviews due inside the window, overdue ones included.
    #[must_use]
    pub fn total_reviews(&self) -> u32 {
        self.model.buckets.total_reviews()
    }

    #[must_use]
    pub fn max_bucket_count(&self) -> u32 {
        self.model.buckets.max_bucket_count()
    }

    #[must_use]
    pub fn window_label(&self) -> String {
        window_label(self.config.days)
    }

    #[must_use]
    pub fn pending_refresh(&self) -> Option<RefreshTicket> {
        self.refresh.pending()
    }

    /// Validates raw records, replaces the inventory and rebuilds.
    ///
    /// Returns how many records were accepted.
    pub fn set_item_records<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = ItemRecord>,
    {
        self.items = prepare_items(records);
        self.rebuild(RebuildTrigger::ItemsRefreshed);
        self.items.len()
    }

    /// Replaces the inventory with typed items and rebuilds.
    ///
    /// Items with an unscheduled stage or a zero level are dropped. Returns
    /// the number of items kept.
    pub fn set_items(&mut self, items: Vec<ReviewItem>) -> usize {
        let received = items.len();
        let mut items: Vec<ReviewItem> = items
            .into_iter()
            .filter(|item| match item.validate() {
                Ok(()) => true,
                Err(err) => {
                    debug!(error = %err, "dropping review item");
                    false
                }
            })
            .collect();
        sort_by_due_time(&mut items);
        debug!(
            accepted = items.len(),
            rejected = received - items.len(),
            "replaced item inventory"
        );
        self.items = items;
        self.rebuild(RebuildTrigger::ItemsRefreshed);
        self.items.len()
    }

    /// Changes the window length; values above `max_days` are clamped.
    pub fn set_window_days(&mut self, days: f64) -> TimelineResult<()> {
        self.config.days = validate_window_days(days, self.config.max_days)?;
        self.rebuild(RebuildTrigger::WindowChanged);
        Ok(())
    }

    pub fn resize(&mut self, viewport: Viewport) -> TimelineResult<()> {
        if !viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if viewport == self.config.viewport {
            trace!(width = viewport.width, height = viewport.height, "resize ignored");
            return Ok(());
        }
        self.config.viewport = viewport;
        self.rebuild(RebuildTrigger::Resized);
        Ok(())
    }

    pub fn set_config(&mut self, config: TimelineConfig) -> TimelineResult<()> {
        self.config = config.validate()?;
        self.rebuild(RebuildTrigger::SettingsChanged);
        Ok(())
    }

    /// Fires the hourly refresh if `ticket` is still the pending one.
    ///
    /// Stale tickets are ignored and return `false`.
    pub fn hourly_tick(&mut self, ticket: RefreshTicket) -> bool {
        if !self.refresh.is_current(ticket) {
            warn!(
                generation = ticket.generation,
                due_at = %ticket.due_at,
                "ignoring stale refresh ticket"
            );
            return false;
        }
        self.rebuild(RebuildTrigger::HourlyTick);
        true
    }

    pub fn rebuild(&mut self, trigger: RebuildTrigger) {
        self.refresh.cancel();
        let now = self.clock.now();
        self.model = TimelineModel::build(&self.config, &self.items, now);
        self.highlight.reset();
        self.hovered_bar = None;
        let ticket = self.refresh.reschedule(now);
        debug!(
            trigger = trigger.as_str(),
            window_hours = self.model.buckets.total_hours(),
            bucket_hours = self.model.buckets.bucket_hours(),
            buckets = self.model.buckets.len(),
            total_reviews = self.model.buckets.total_reviews(),
            next_refresh = %ticket.due_at,
            "timeline rebuilt"
        );
    }

    /// Builds the drawing payload for the current model and highlight.
    #[must_use]
    pub fn frame(&self) -> TimelineFrame {
        build_timeline_frame(&FrameInputs {
            layout: self.model.layout,
            buckets: &self.model.buckets,
            axis: &self.model.axis,
            count_axis: self.model.count_axis,
            geometry: self.model.geometry,
            highlight: self.highlight,
            bar_style: self.config.bar_style,
            max_bar_width: self.config.max_bar_width,
            show_current_level_markers: self.config.current_level_markers
                != MarkerCategories::None,
            show_burn_markers: self.config.burn_markers,
        })
    }

    pub fn render(&mut self) -> TimelineResult<()> {
        let frame = self.frame().to_render_frame();
        trace!(
            rects = frame.rects.len(),
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            "rendering timeline frame"
        );
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
