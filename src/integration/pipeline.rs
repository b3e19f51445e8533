//! CountingPipeline for combining detection, tracking and counting.

use tracing::debug;

use super::{DetectionFilter, DetectionSource};
use crate::counter::{CounterConfig, CrossingCounter, CrossingEvent};
use crate::error::Result;
use crate::tracker::{CentroidTracker, ObjectId, Point, TrackedObject, TrackerConfig};

/// Configuration for a [`CountingPipeline`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig {
    pub tracker: TrackerConfig,
    /// Counting line. `None` places it across the middle of the first frame.
    pub line_y: Option<i32>,
    pub filter: DetectionFilter,
}

/// Owned copy of one tracked object's state for a frame report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectSnapshot {
    pub id: ObjectId,
    pub centroid: Point,
    pub disappeared: u64,
    /// Most recent positions, oldest first.
    pub trail: Vec<Point>,
    pub counted: bool,
}

/// Number of trail points copied into each snapshot.
const SNAPSHOT_TRAIL_LEN: usize = 10;

impl ObjectSnapshot {
    fn capture(obj: &TrackedObject, counter: &CrossingCounter) -> Self {
        Self {
            id: obj.id(),
            centroid: obj.centroid(),
            disappeared: obj.disappeared(),
            trail: obj.trail(SNAPSHOT_TRAIL_LEN).collect(),
            counted: counter.is_counted(obj.id()),
        }
    }
}

/// Result of processing one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameReport {
    /// 1-based frame number.
    pub frame: u64,
    pub line_y: i32,
    pub objects: Vec<ObjectSnapshot>,
    pub events: Vec<CrossingEvent>,
    pub people_in: u64,
    pub people_out: u64,
}

impl FrameReport {
    pub fn net_count(&self) -> i64 {
        self.people_in as i64 - self.people_out as i64
    }
}

/// Running totals of a pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountSummary {
    pub people_in: u64,
    pub people_out: u64,
    pub net_count: i64,
    pub frames_processed: u64,
    pub active_tracks: usize,
}

/// Bundles a `DetectionSource` with a tracker and a crossing counter.
///
/// One pipeline serves one video stream; frames must be submitted in order.
pub struct CountingPipeline<D: DetectionSource> {
    detector: D,
    filter: DetectionFilter,
    tracker: CentroidTracker,
    line_y: Option<i32>,
    counter: Option<CrossingCounter>,
}

impl<D: DetectionSource> CountingPipeline<D> {
    /// Create a new counting pipeline with the given detector and config.
    pub fn new(detector: D, config: PipelineConfig) -> Result<Self> {
        let tracker = CentroidTracker::new(config.tracker)?;
        Ok(Self {
            detector,
            filter: config.filter,
            tracker,
            line_y: config.line_y,
            counter: config
                .line_y
                .map(|line_y| CrossingCounter::new(CounterConfig::new(line_y))),
        })
    }

    /// Create a new pipeline with default configuration.
    pub fn with_default_config(detector: D) -> Result<Self> {
        Self::new(detector, PipelineConfig::default())
    }

    /// Process a single frame.
    ///
    /// Runs detection, filters the detections, updates the tracker and then
    /// the counter.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> std::result::Result<FrameReport, D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        let boxes = self.filter.apply(&detections);

        let line_y = self.line_y;
        let counter = self.counter.get_or_insert_with(|| {
            let config = line_y
                .map(CounterConfig::new)
                .unwrap_or_else(|| CounterConfig::for_frame_height(height));
            debug!(line_y = config.line_y, "counting line placed");
            CrossingCounter::new(config)
        });

        let objects = self.tracker.update(&boxes);
        let events = counter.update(objects);
        let snapshots = objects
            .iter()
            .map(|obj| ObjectSnapshot::capture(obj, counter))
            .collect();

        Ok(FrameReport {
            frame: self.tracker.frame_count(),
            line_y: counter.line_y(),
            objects: snapshots,
            events,
            people_in: counter.people_in(),
            people_out: counter.people_out(),
        })
    }

    /// Totals so far.
    pub fn summary(&self) -> CountSummary {
        let (people_in, people_out, net_count) = self
            .counter
            .as_ref()
            .map(|c| (c.people_in(), c.people_out(), c.net_count()))
            .unwrap_or_default();
        CountSummary {
            people_in,
            people_out,
            net_count,
            frames_processed: self.tracker.frame_count(),
            active_tracks: self.tracker.len(),
        }
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    /// Counter, available once the counting line is known.
    pub fn counter(&self) -> Option<&CrossingCounter> {
        self.counter.as_ref()
    }
}
