//! Single tracked object and its bounded position history.

use std::collections::VecDeque;

use crate::tracker::rect::Point;

/// Identity handle assigned at registration. Never reused by a tracker.
pub type ObjectId = u64;

/// Single tracked object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedObject {
    id: ObjectId,
    centroid: Point,
    disappeared: u64,
    history: VecDeque<Point>,
    history_capacity: usize,
}

impl TrackedObject {
    /// Create a freshly registered object. `history_capacity` must be non-zero.
    pub(crate) fn new(id: ObjectId, centroid: Point, history_capacity: usize) -> Self {
        let mut history = VecDeque::with_capacity(history_capacity);
        history.push_back(centroid);
        Self {
            id,
            centroid,
            disappeared: 0,
            history,
            history_capacity,
        }
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Centroid of the most recent matched detection.
    #[inline]
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Consecutive frames without a matching detection.
    #[inline]
    pub fn disappeared(&self) -> u64 {
        self.disappeared
    }

    /// Position history, oldest first. Always ends with [`Self::centroid`].
    pub fn history(&self) -> impl ExactSizeIterator<Item = Point> + DoubleEndedIterator + '_ {
        self.history.iter().copied()
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The two most recent positions as `(previous, current)`.
    pub fn last_two(&self) -> Option<(Point, Point)> {
        let len = self.history.len();
        if len < 2 {
            return None;
        }
        Some((self.history[len - 2], self.history[len - 1]))
    }

    /// Up to `n` most recent positions, oldest first.
    pub fn trail(&self, n: usize) -> impl ExactSizeIterator<Item = Point> + '_ {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip).copied()
    }

    /// Move to a matched centroid and reset the disappearance counter.
    pub(crate) fn update(&mut self, centroid: Point) {
        if self.history.len() == self.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(centroid);
        self.centroid = centroid;
        self.disappeared = 0;
    }

    /// Record a frame without a match and return the new count.
    pub(crate) fn mark_missed(&mut self) -> u64 {
        self.disappeared = self.disappeared.saturating_add(1);
        self.disappeared
    }
}
