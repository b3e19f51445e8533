//! Directional counting across a horizontal line.

use std::collections::HashSet;

use tracing::info;

use crate::counter::direction::{CrossingDirection, CrossingEvent};
use crate::tracker::{ObjectId, TrackedObject};

/// Configuration for the CrossingCounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterConfig {
    /// y coordinate of the counting line.
    pub line_y: i32,
}

impl CounterConfig {
    pub fn new(line_y: i32) -> Self {
        Self { line_y }
    }

    /// Line across the middle of a frame of the given height.
    pub fn for_frame_height(height: u32) -> Self {
        Self {
            line_y: (height / 2) as i32,
        }
    }
}

/// Counts tracked objects crossing a horizontal line.
///
/// Each identity is counted at most once, in whichever direction it first
/// crosses. Feed it the tracker output after every update, in frame order.
#[derive(Debug, Clone)]
pub struct CrossingCounter {
    config: CounterConfig,
    counted: HashSet<ObjectId>,
    people_in: u64,
    people_out: u64,
    frame: u64,
}

impl CrossingCounter {
    pub fn new(config: CounterConfig) -> Self {
        Self {
            config,
            counted: HashSet::new(),
            people_in: 0,
            people_out: 0,
            frame: 0,
        }
    }

    /// Inspect the latest movement of every object and return the crossings
    /// counted on this frame, in object order.
    pub fn update(&mut self, objects: &[TrackedObject]) -> Vec<CrossingEvent> {
        self.frame += 1;

        // Objects dropped by the tracker never come back under the same id.
        self.counted
            .retain(|id| objects.iter().any(|obj| obj.id() == *id));

        let mut events = Vec::new();
        for obj in objects {
            if self.counted.contains(&obj.id()) {
                continue;
            }
            let Some((prev, curr)) = obj.last_two() else {
                continue;
            };
            let Some(direction) = CrossingDirection::classify(prev.y, curr.y, self.config.line_y)
            else {
                continue;
            };

            match direction {
                CrossingDirection::In => self.people_in += 1,
                CrossingDirection::Out => self.people_out += 1,
            }
            self.counted.insert(obj.id());
            info!(
                id = obj.id(),
                %direction,
                people_in = self.people_in,
                people_out = self.people_out,
                "line crossed"
            );
            events.push(CrossingEvent {
                id: obj.id(),
                direction,
                frame: self.frame,
                position: curr,
            });
        }
        events
    }

    #[inline]
    pub fn people_in(&self) -> u64 {
        self.people_in
    }

    #[inline]
    pub fn people_out(&self) -> u64 {
        self.people_out
    }

    /// `people_in - people_out`.
    #[inline]
    pub fn net_count(&self) -> i64 {
        self.people_in as i64 - self.people_out as i64
    }

    /// Whether this identity has already produced a crossing.
    pub fn is_counted(&self, id: ObjectId) -> bool {
        self.counted.contains(&id)
    }

    #[inline]
    pub fn line_y(&self) -> i32 {
        self.config.line_y
    }

    #[inline]
    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Clear counters and crossing flags, keeping the line.
    pub fn reset(&mut self) {
        self.counted.clear();
        self.people_in = 0;
        self.people_out = 0;
        self.frame = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{CentroidTracker, Rect, TrackerConfig};

    /// 10x10 box centred on (x, y).
    fn at(x: i32, y: i32) -> Rect {
        Rect::new(x - 5, y - 5, x + 5, y + 5)
    }

    fn setup(line_y: i32) -> (CentroidTracker, CrossingCounter) {
        (
            CentroidTracker::new(TrackerConfig::default()).unwrap(),
            CrossingCounter::new(CounterConfig::new(line_y)),
        )
    }

    #[test]
    fn test_for_frame_height() {
        assert_eq!(CounterConfig::for_frame_height(480).line_y, 240);
        assert_eq!(CounterConfig::for_frame_height(481).line_y, 240);
    }

    #[test]
    fn test_single_point_is_skipped() {
        let (mut tracker, mut counter) = setup(50);
        let events = counter.update(tracker.update(&[at(0, 50)]));
        assert!(events.is_empty());
        assert_eq!(counter.people_in(), 0);
    }

    #[test]
    fn test_entry_then_no_recount() {
        let (mut tracker, mut counter) = setup(50);
        counter.update(tracker.update(&[at(0, 40)]));
        let events = counter.update(tracker.update(&[at(0, 55)]));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, 0);
        assert_eq!(events[0].direction, CrossingDirection::In);
        assert_eq!(events[0].frame, 2);
        assert!(counter.is_counted(0));

        let events = counter.update(tracker.update(&[at(0, 40)]));
        assert!(events.is_empty());
        assert_eq!(counter.people_in(), 1);
        assert_eq!(counter.people_out(), 0);
    }

    #[test]
    fn test_exit() {
        let (mut tracker, mut counter) = setup(50);
        counter.update(tracker.update(&[at(0, 70)]));
        counter.update(tracker.update(&[at(0, 60)]));
        let events = counter.update(tracker.update(&[at(0, 45)]));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].direction, CrossingDirection::Out);
        assert_eq!(counter.net_count(), -1);
    }

    #[test]
    fn test_missed_frame_does_not_double_count() {
        let (mut tracker, mut counter) = setup(50);
        counter.update(tracker.update(&[at(0, 40)]));
        counter.update(tracker.update(&[at(0, 55)]));
        // History is unchanged while the object is missing.
        counter.update(tracker.update(&[]));
        counter.update(tracker.update(&[]));
        assert_eq!(counter.people_in(), 1);
    }

    #[test]
    fn test_flags_dropped_with_deregistered_objects() {
        let mut tracker = CentroidTracker::new(TrackerConfig {
            max_disappeared: 1,
            ..TrackerConfig::default()
        })
        .unwrap();
        let mut counter = CrossingCounter::new(CounterConfig::new(50));
        counter.update(tracker.update(&[at(0, 40)]));
        counter.update(tracker.update(&[at(0, 55)]));
        assert!(counter.is_counted(0));

        counter.update(tracker.update(&[]));
        assert!(counter.is_counted(0));
        counter.update(tracker.update(&[]));
        assert!(!counter.is_counted(0));
    }

    #[test]
    fn test_reset() {
        let (mut tracker, mut counter) = setup(50);
        counter.update(tracker.update(&[at(0, 40)]));
        counter.update(tracker.update(&[at(0, 55)]));
        counter.reset();
        assert_eq!(counter.people_in(), 0);
        assert!(!counter.is_counted(0));
        assert_eq!(counter.line_y(), 50);
    }
}
