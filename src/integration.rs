//! Integration module for connecting object detection backends with the
//! tracker and crossing counter.
//!
//! The core never runs a model itself; implement [`DetectionSource`] for
//! your backend and drive a [`CountingPipeline`] one frame at a time.

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{Detection, DetectionFilter, DetectionSource, IntoDetections};
pub use pipeline::{CountSummary, CountingPipeline, FrameReport, ObjectSnapshot, PipelineConfig};
