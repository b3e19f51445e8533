//! Centroid tracking and line-crossing counters for detection streams.
//!
//! The [`CentroidTracker`] assigns persistent identities to per-frame
//! detection boxes using only their centroids. The [`CrossingCounter`]
//! consumes the tracker output and counts identities crossing a
//! horizontal line in either direction.
//!
//! ```
//! use centroidtrack_rs::{CentroidTracker, CounterConfig, CrossingCounter, Rect, TrackerConfig};
//!
//! let mut tracker = CentroidTracker::new(TrackerConfig::default()).unwrap();
//! let mut counter = CrossingCounter::new(CounterConfig::new(50));
//!
//! tracker.update(&[Rect::new(0, 30, 10, 50)]);
//! let objects = tracker.update(&[Rect::new(0, 50, 10, 60)]);
//! let events = counter.update(objects);
//!
//! assert_eq!(events.len(), 1);
//! assert_eq!(counter.people_in(), 1);
//! ```

pub mod counter;
mod error;
pub mod integration;
pub mod tracker;

pub use counter::{CounterConfig, CrossingCounter, CrossingDirection, CrossingEvent};
pub use error::{Error, Result};
pub use integration::{
    CountSummary, CountingPipeline, Detection, DetectionBuilder, DetectionFilter,
    DetectionSource, FrameReport, IntoDetections, ObjectSnapshot, PipelineConfig,
};
pub use tracker::{
    AssignmentResult, CentroidTracker, GreedyNearest, MatchingPolicy, ObjectId,
    OptimalAssignment, Point, Rect, TrackedObject, TrackerConfig,
};
