use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Clock;
use crate::interaction::{BucketRange, HighlightEffect, HighlightPhase};
use crate::render::Renderer;

use super::render_frame_builder::bar_span;
use super::review_summary::SummaryContext;
use super::{RangeSummary, TimelineEngine};

/// What the host should do with the review-info pop-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReviewInfoEvent {
    Unchanged,
    Show(RangeSummary),
    Hide,
}

impl<R: Renderer, C: Clock> TimelineEngine<R, C> {
    #[must_use]
    pub fn highlight_phase(&self) -> HighlightPhase {
        self.highlight.phase()
    }

    /// Boundary a panel x coordinate snaps to.
    #[must_use]
    pub fn nearest_boundary(&self, panel_x: f64) -> usize {
        self.model
            .geometry
            .nearest_boundary(&self.model.buckets, panel_x)
    }

    /// Bucket whose bar hit box contains the panel point, if any.
    #[must_use]
    pub fn bar_at(&self, panel_x: f64, panel_y: f64) -> Option<usize> {
        let layout = self.model.layout;
        if !layout.in_plot(panel_x, panel_y) {
            return None;
        }
        let axis_x = panel_x - layout.margin_left;
        self.model
            .buckets
            .buckets()
            .iter()
            .position(|bucket| {
                let (x1, x2) = bar_span(self.model.geometry, bucket, self.config.max_bar_width);
                !bucket.stats.is_empty() && axis_x >= x1 && axis_x < x2
            })
    }

    /// Aggregates `range` into a pop-up payload against the current model.
    #[must_use]
    pub fn range_summary(&self, range: BucketRange, sticky: bool) -> RangeSummary {
        let context = SummaryContext {
            buckets: &self.model.buckets,
            now: self.clock.now(),
            time_format: self.config.time_format,
            policy: self.config.stats_policy(),
            details: self.config.review_details,
        };
        RangeSummary::build(&context, range, sticky)
    }

    pub fn pointer_move(&mut self, panel_x: f64, panel_y: f64) -> ReviewInfoEvent {
        if !self.config.review_details.allows_highlight() {
            return ReviewInfoEvent::Unchanged;
        }
        if self.highlight.phase() == HighlightPhase::Dragging {
            let boundary = self.nearest_boundary(panel_x);
            let effect = self.highlight.on_drag(boundary);
            return self.resolve(effect);
        }

        let effect = if self.model.layout.in_highlight_strip(panel_x, panel_y) {
            let effect = if self.hovered_bar.take().is_some() {
                self.highlight.on_bar_leave()
            } else {
                HighlightEffect::Unchanged
            };
            let boundary = self.nearest_boundary(panel_x);
            self.highlight.on_hover(boundary);
            effect
        } else if let Some(bucket) = self.bar_at(panel_x, panel_y) {
            if self.hovered_bar == Some(bucket) {
                HighlightEffect::Unchanged
            } else {
                self.hovered_bar = Some(bucket);
                self.highlight.on_bar_enter(bucket)
            }
        } else if self.hovered_bar.take().is_some() {
            self.highlight.on_bar_leave()
        } else if self.highlight.hover_boundary().is_some() {
            self.highlight.on_pointer_leave()
        } else {
            HighlightEffect::Unchanged
        };
        self.resolve(effect)
    }

    /// Primary button pressed; starts a drag inside the highlight strip.
    pub fn pointer_down(&mut self, panel_x: f64, panel_y: f64) -> ReviewInfoEvent {
        if !self.config.review_details.allows_highlight()
            || !self.model.layout.in_highlight_strip(panel_x, panel_y)
        {
            return ReviewInfoEvent::Unchanged;
        }
        self.hovered_bar = None;
        let boundary = self.nearest_boundary(panel_x);
        trace!(boundary, "highlight drag started");
        let effect = self.highlight.on_press(boundary);
        self.resolve(effect)
    }

    /// Primary button released anywhere; ends an active drag.
    pub fn pointer_up(&mut self, panel_x: f64) -> ReviewInfoEvent {
        if self.highlight.phase() != HighlightPhase::Dragging {
            return ReviewInfoEvent::Unchanged;
        }
        let boundary = self.nearest_boundary(panel_x);
        let effect = self.highlight.on_release(boundary);
        trace!(boundary, ?effect, "highlight drag released");
        self.resolve(effect)
    }

    /// Click after a press/release pair.
    ///
    /// Bars select their own bucket; clicks in the highlight strip are part
    /// of a drag and ignored; anything else dismisses a committed range.
    pub fn click(&mut self, panel_x: f64, panel_y: f64) -> ReviewInfoEvent {
        if !self.config.review_details.allows_highlight()
            || self.model.layout.in_highlight_strip(panel_x, panel_y)
        {
            return ReviewInfoEvent::Unchanged;
        }
        let effect = match self.bar_at(panel_x, panel_y) {
            Some(bucket) => {
                self.hovered_bar = Some(bucket);
                self.highlight.on_bar_click(bucket)
            }
            None => self.highlight.on_outside_click(),
        };
        self.resolve(effect)
    }

    /// Pointer left the panel; a committed range or active drag survives.
    pub fn pointer_leave(&mut self) -> ReviewInfoEvent {
        if self.highlight.phase() == HighlightPhase::Dragging {
            return ReviewInfoEvent::Unchanged;
        }
        self.hovered_bar = None;
        let effect = self.highlight.on_pointer_leave();
        self.resolve(effect)
    }

    fn resolve(&self, effect: HighlightEffect) -> ReviewInfoEvent {
        match effect {
            HighlightEffect::Unchanged => ReviewInfoEvent::Unchanged,
            HighlightEffect::Preview(range) => {
                ReviewInfoEvent::Show(self.range_summary(range, false))
            }
            HighlightEffect::Commit(range) => {
                ReviewInfoEvent::Show(self.range_summary(range, true))
            }
            HighlightEffect::Clear => ReviewInfoEvent::Hide,
        }
    }
}
