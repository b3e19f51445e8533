mod centroid_tracker;
mod matching;
mod rect;
mod tracked_object;

pub use centroid_tracker::{CentroidTracker, TrackerConfig};
pub use matching::{
    AssignmentResult, GreedyNearest, MatchingPolicy, OptimalAssignment, centroid_distance,
};
pub use rect::{Point, Rect};
pub use tracked_object::{ObjectId, TrackedObject};
