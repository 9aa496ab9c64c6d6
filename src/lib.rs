//! review-timeline: adaptive review-forecast timeline engine.
//!
//! Scheduled review items are split into hour-aligned buckets whose width
//! follows the window length and panel width. The crate derives the time and
//! count axes, bar geometry, and a pointer-driven range highlight with
//! aggregated summaries. Drawing is delegated to a `render::Renderer`.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TimelineConfig, TimelineEngine};
pub use error::{TimelineError, TimelineResult};
