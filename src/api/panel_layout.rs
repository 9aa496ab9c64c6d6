use serde::{Deserialize, Serialize};

use crate::core::{CountAxis, MIN_AXIS_WIDTH_PX, Viewport};

pub const PANEL_MARGIN_TOP_PX: f64 = 20.0;
pub const PANEL_MARGIN_BOTTOM_PX: f64 = 16.0;
/// Left margin assumed before the count axis is known.
pub const DEFAULT_MARGIN_LEFT_PX: f64 = 28.0;
/// Slack left of the plot that still belongs to the highlight strip.
pub const HIGHLIGHT_STRIP_SLACK_PX: f64 = 2.0;
const MIN_PLOT_HEIGHT_PX: f64 = 1.0;

/// Panel regions in pixels.
///
/// The highlight strip runs along the top margin above the plot; bars and the
/// count grid live in the plot area below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub viewport: Viewport,
    pub margin_left: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl PanelLayout {
    #[must_use]
    pub fn new(viewport: Viewport, count_axis: CountAxis) -> Self {
        Self {
            viewport,
            margin_left: count_axis.label_margin_px(),
            margin_top: PANEL_MARGIN_TOP_PX,
            margin_bottom: PANEL_MARGIN_BOTTOM_PX,
        }
    }

    #[must_use]
    pub fn plot_width(self) -> f64 {
        self.viewport.axis_width(self.margin_left)
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        (f64::from(self.viewport.height) - self.margin_top - self.margin_bottom)
            .max(MIN_PLOT_HEIGHT_PX)
    }

    /// Panel y of the count axis zero line.
    #[must_use]
    pub fn plot_bottom(self) -> f64 {
        self.margin_top + self.plot_height()
    }

    #[must_use]
    pub fn in_highlight_strip(self, x: f64, y: f64) -> bool {
        (0.0..self.margin_top).contains(&y)
            && x >= self.margin_left - HIGHLIGHT_STRIP_SLACK_PX
            && x <= self.margin_left + self.plot_width()
    }

    #[must_use]
    pub fn in_plot(self, x: f64, y: f64) -> bool {
        (self.margin_top..self.plot_bottom()).contains(&y)
            && x >= self.margin_left
            && x < self.margin_left + self.plot_width()
    }
}

/// Axis width used for scale selection, before the count axis is known.
#[must_use]
pub fn scale_axis_width(viewport: Viewport) -> f64 {
    (f64::from(viewport.width) - DEFAULT_MARGIN_LEFT_PX).max(MIN_AXIS_WIDTH_PX)
}

#[cfg(test)]
mod tests {
    use super::{PanelLayout, scale_axis_width};
    use crate::core::{CountAxis, Viewport};

    #[test]
    fn regions_follow_count_axis_margin() {
        let axis = CountAxis::for_max_reviews(120, None, false);
        let layout = PanelLayout::new(Viewport::new(400, 100), axis);
        assert_eq!(layout.margin_left, 28.0);
        assert_eq!(layout.plot_height(), 64.0);
        assert!(layout.in_highlight_strip(27.0, 5.0));
        assert!(!layout.in_highlight_strip(27.0, 25.0));
        assert!(layout.in_plot(100.0, 50.0));
        assert!(!layout.in_plot(100.0, 90.0));
    }

    #[test]
    fn scale_width_never_collapses() {
        assert_eq!(scale_axis_width(Viewport::new(10, 100)), 60.0);
        assert_eq!(scale_axis_width(Viewport::new(788, 100)), 760.0);
    }
}
