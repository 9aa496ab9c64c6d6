use std::ops::Range;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightPhase {
    Idle,
    Dragging,
    Committed,
}

/// Normalized half-open bucket range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketRange {
    pub start: usize,
    pub end: usize,
}

impl BucketRange {
    /// Orders two boundary indices into a range.
    #[must_use]
    pub fn between(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[must_use]
    pub fn single(bucket: usize) -> Self {
        Self {
            start: bucket,
            end: bucket + 1,
        }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// Transient selection; `end` may precede `start` while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSelection {
    pub start: usize,
    pub end: usize,
    pub dragging: bool,
    pub committed: bool,
}

impl HighlightSelection {
    #[must_use]
    pub fn range(self) -> BucketRange {
        BucketRange::between(self.start, self.end)
    }
}

/// What the host should do with the summary pop-up after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightEffect {
    Unchanged,
    /// Show a non-sticky summary for the range.
    Preview(BucketRange),
    /// Show a sticky summary for the range.
    Commit(BucketRange),
    Clear,
}

/// Pointer-driven range selection over bucket boundaries.
///
/// `idle -> dragging` on press, `dragging -> committed` on a release that
/// spans at least one bucket, `dragging -> idle` on a zero-width release,
/// `committed -> idle` on an outside click. Hovering or clicking a single bar
/// selects `[bucket, bucket + 1)` directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightState {
    selection: Option<HighlightSelection>,
    hover_boundary: Option<usize>,
}

impl HighlightState {
    #[must_use]
    pub fn phase(self) -> HighlightPhase {
        match self.selection {
            Some(selection) if selection.dragging => HighlightPhase::Dragging,
            Some(selection) if selection.committed => HighlightPhase::Committed,
            _ => HighlightPhase::Idle,
        }
    }

    #[must_use]
    pub fn selection(self) -> Option<HighlightSelection> {
        self.selection
    }

    /// Boundary under the pointer while no range is held.
    #[must_use]
    pub fn hover_boundary(self) -> Option<usize> {
        self.hover_boundary
    }

    fn is_locked(self) -> bool {
        self.selection
            .is_some_and(|selection| selection.dragging || selection.committed)
    }

    pub fn reset(&mut self) {
        self.selection = None;
        self.hover_boundary = None;
    }

    pub fn on_hover(&mut self, boundary: usize) -> HighlightEffect {
        if !self.is_locked() {
            self.hover_boundary = Some(boundary);
        }
        HighlightEffect::Unchanged
    }

    pub fn on_press(&mut self, boundary: usize) -> HighlightEffect {
        self.hover_boundary = None;
        self.selection = Some(HighlightSelection {
            start: boundary,
            end: boundary,
            dragging: true,
            committed: false,
        });
        HighlightEffect::Unchanged
    }

    pub fn on_drag(&mut self, boundary: usize) -> HighlightEffect {
        let Some(selection) = self.selection.as_mut().filter(|s| s.dragging) else {
            return HighlightEffect::Unchanged;
        };
        selection.end = boundary;
        let range = selection.range();
        if range.is_empty() {
            HighlightEffect::Clear
        } else {
            HighlightEffect::Preview(range)
        }
    }

    pub fn on_release(&mut self, boundary: usize) -> HighlightEffect {
        let Some(mut selection) = self.selection.filter(|s| s.dragging) else {
            return HighlightEffect::Unchanged;
        };
        selection.dragging = false;
        selection.end = boundary;
        if selection.start == selection.end {
            self.reset();
            return HighlightEffect::Clear;
        }
        selection.committed = true;
        self.selection = Some(selection);
        HighlightEffect::Commit(selection.range())
    }

    pub fn on_bar_enter(&mut self, bucket: usize) -> HighlightEffect {
        if self.is_locked() {
            return HighlightEffect::Unchanged;
        }
        self.selection = Some(HighlightSelection {
            start: bucket,
            end: bucket + 1,
            dragging: false,
            committed: false,
        });
        HighlightEffect::Preview(BucketRange::single(bucket))
    }

    pub fn on_bar_leave(&mut self) -> HighlightEffect {
        if self.is_locked() {
            return HighlightEffect::Unchanged;
        }
        self.selection = None;
        HighlightEffect::Clear
    }

    pub fn on_bar_click(&mut self, bucket: usize) -> HighlightEffect {
        self.hover_boundary = None;
        self.selection = Some(HighlightSelection {
            start: bucket,
            end: bucket + 1,
            dragging: false,
            committed: true,
        });
        HighlightEffect::Commit(BucketRange::single(bucket))
    }

    /// Pointer left the tracked region; only a transient preview is cleared.
    pub fn on_pointer_leave(&mut self) -> HighlightEffect {
        if self.is_locked() {
            return HighlightEffect::Unchanged;
        }
        self.reset();
        HighlightEffect::Clear
    }

    pub fn on_outside_click(&mut self) -> HighlightEffect {
        if self.phase() != HighlightPhase::Committed {
            return HighlightEffect::Unchanged;
        }
        self.reset();
        HighlightEffect::Clear
    }
}
