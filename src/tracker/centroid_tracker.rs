//! Main centroid tracking algorithm.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::tracker::matching::{self, AssignmentResult, GreedyNearest, MatchingPolicy};
use crate::tracker::rect::{Point, Rect};
use crate::tracker::tracked_object::{ObjectId, TrackedObject};

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerConfig {
    /// Consecutive unmatched frames tolerated before an object is dropped.
    pub max_disappeared: u32,
    /// Number of positions kept per object.
    pub history_capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_disappeared: 40,
            history_capacity: 50,
        }
    }
}

impl TrackerConfig {
    /// `max_disappeared` may be zero: objects then drop on their first miss.
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(Error::invalid_config("history_capacity", "must be positive"));
        }
        Ok(())
    }
}

/// Tracks objects across frames by matching detection centroids.
///
/// Each call to [`update`](Self::update) consumes one frame of detections.
/// Frames must be fed in temporal order; one instance serves one stream.
#[derive(Debug, Clone)]
pub struct CentroidTracker<P = GreedyNearest> {
    objects: Vec<TrackedObject>,
    next_id: ObjectId,
    frame_count: u64,
    config: TrackerConfig,
    policy: P,
}

impl CentroidTracker<GreedyNearest> {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        Self::with_policy(config, GreedyNearest)
    }
}

impl<P: MatchingPolicy> CentroidTracker<P> {
    pub fn with_policy(config: TrackerConfig, policy: P) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            objects: Vec::new(),
            next_id: 0,
            frame_count: 0,
            config,
            policy,
        })
    }

    /// Process one frame of detections and return the live objects in
    /// registration order.
    pub fn update(&mut self, detections: &[Rect]) -> &[TrackedObject] {
        self.frame_count += 1;

        // Step 1: No detections, everything tracked goes missing
        if detections.is_empty() {
            for obj in &mut self.objects {
                obj.mark_missed();
            }
            self.remove_expired();
            return &self.objects;
        }

        // Step 2: Centroids in input order
        let inputs: Vec<Point> = detections.iter().map(Rect::centroid).collect();

        // Step 3: Nothing to match against, register everything
        if self.objects.is_empty() {
            for centroid in inputs {
                self.register(centroid);
            }
            return &self.objects;
        }

        // Step 4: Match tracked objects to input centroids
        let tracked: Vec<Point> = self.objects.iter().map(TrackedObject::centroid).collect();
        let dists = matching::centroid_distance(&tracked, &inputs);

        let AssignmentResult {
            matches,
            unmatched_rows,
            unmatched_cols,
        } = self.policy.assign(&dists);

        for (row, col) in matches {
            let obj = &mut self.objects[row];
            trace!(id = obj.id(), from = ?obj.centroid(), to = ?inputs[col], "matched");
            obj.update(inputs[col]);
        }

        for row in unmatched_rows {
            self.objects[row].mark_missed();
        }
        // Rows index into `objects`, so removal waits until matching is done.
        self.remove_expired();

        // Step 5: Register leftover detections
        for col in unmatched_cols {
            self.register(inputs[col]);
        }

        &self.objects
    }

    fn register(&mut self, centroid: Point) {
        let id = self.next_id;
        self.next_id += 1;
        debug!(id, ?centroid, "registered object");
        self.objects
            .push(TrackedObject::new(id, centroid, self.config.history_capacity));
    }

    fn remove_expired(&mut self) {
        let max_disappeared = self.config.max_disappeared;
        self.objects.retain(|obj| {
            let keep = obj.disappeared() <= u64::from(max_disappeared);
            if !keep {
                debug!(id = obj.id(), disappeared = obj.disappeared(), "deregistered object");
            }
            keep
        });
    }
}

impl<P> CentroidTracker<P> {
    /// Live objects in registration order.
    #[inline]
    pub fn objects(&self) -> &[TrackedObject] {
        &self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&TrackedObject> {
        self.objects.iter().find(|obj| obj.id() == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Identity the next registration will receive.
    #[inline]
    pub fn next_id(&self) -> ObjectId {
        self.next_id
    }

    /// Number of frames processed so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }
}
