use serde::{Deserialize, Serialize};

const MAX_MINOR_TICS: u32 = 5;
const MIN_AXIS_MAX: u32 = 3;

/// Vertical review-count axis: tic steps and rounded maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountAxis {
    pub minor_step: u32,
    pub major_step: u32,
    pub max_reviews: u32,
}

impl CountAxis {
    /// Builds the axis for the largest bucket count.
    ///
    /// `cap` limits the axis when the data exceeds it, or always when
    /// `force_cap` is set.
    #[must_use]
    pub fn for_max_reviews(max_bucket_count: u32, cap: Option<u32>, force_cap: bool) -> Self {
        let mut target = max_bucket_count;
        if let Some(cap) = cap.filter(|cap| *cap > 0) {
            if force_cap || target > cap {
                target = cap;
            }
        }

        let mut minor_step = 1_u32;
        let mut major_step = 5_u32;
        while target.div_ceil(minor_step) > MAX_MINOR_TICS {
            match leading_digit(minor_step) {
                1 => {
                    minor_step *= 2;
                    major_step *= 2;
                }
                2 => minor_step = minor_step * 5 / 2,
                _ => {
                    minor_step *= 2;
                    major_step *= 5;
                }
            }
        }

        Self {
            minor_step,
            major_step,
            max_reviews: MIN_AXIS_MAX.max(target.div_ceil(minor_step) * minor_step),
        }
    }

    /// `(value, is_major)` for every tic from zero to the axis maximum.
    pub fn tics(self) -> impl Iterator<Item = (u32, bool)> {
        (0..=self.max_reviews)
            .step_by(self.minor_step as usize)
            .map(move |value| (value, value % self.major_step == 0))
    }

    /// Left margin that fits the widest count label.
    #[must_use]
    pub fn label_margin_px(self) -> f64 {
        let digits = self.max_reviews.to_string().len() as f64;
        digits * 10.0 - 2.0
    }
}

fn leading_digit(mut value: u32) -> u32 {
    while value >= 10 {
        value /= 10;
    }
    value
}
