use centroidtrack_rs::{CentroidTracker, ObjectId, Point, Rect, TrackedObject, TrackerConfig};

fn ids(objects: &[TrackedObject]) -> Vec<ObjectId> {
    objects.iter().map(TrackedObject::id).collect()
}

#[test]
fn test_first_detection_registers_object() {
    let mut tracker = CentroidTracker::new(TrackerConfig::default()).unwrap();

    let objects = tracker.update(&[Rect::new(0, 0, 10, 10)]);
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].id(), 0);
    assert_eq!(objects[0].centroid(), Point::new(5, 5));
    assert_eq!(objects[0].history_len(), 1);
}

#[test]
fn test_deregistered_after_max_disappeared_plus_one() {
    let max_disappeared = 5;
    let mut tracker = CentroidTracker::new(TrackerConfig {
        max_disappeared,
        ..TrackerConfig::default()
    })
    .unwrap();
    tracker.update(&[Rect::new(0, 0, 10, 10)]);

    for frame in 1..=max_disappeared {
        let objects = tracker.update(&[]);
        assert_eq!(objects.len(), 1, "still tracked after {frame} missed frames");
        assert_eq!(objects[0].disappeared(), u64::from(frame));
        assert_eq!(objects[0].centroid(), Point::new(5, 5));
    }

    assert!(tracker.update(&[]).is_empty());
    assert!(tracker.get(0).is_none());
}

#[test]
fn test_no_cross_matching() {
    let mut tracker = CentroidTracker::new(TrackerConfig::default()).unwrap();
    tracker.update(&[Rect::new(-5, -5, 5, 5), Rect::new(95, 95, 105, 105)]);
    assert_eq!(tracker.get(0).unwrap().centroid(), Point::new(0, 0));
    assert_eq!(tracker.get(1).unwrap().centroid(), Point::new(100, 100));

    // Same positions, reversed input order.
    let objects = tracker.update(&[Rect::new(95, 95, 105, 105), Rect::new(-5, -5, 5, 5)]);
    assert_eq!(ids(objects), vec![0, 1]);
    assert_eq!(objects[0].centroid(), Point::new(0, 0));
    assert_eq!(objects[1].centroid(), Point::new(100, 100));
    assert!(objects.iter().all(|obj| obj.disappeared() == 0));
    assert_eq!(tracker.next_id(), 2);
}

#[test]
fn test_object_follows_motion() {
    let mut tracker = CentroidTracker::new(TrackerConfig::default()).unwrap();
    for step in 0..20 {
        let x = step * 5;
        tracker.update(&[Rect::new(x, 100, x + 20, 140)]);
    }
    assert_eq!(tracker.len(), 1);
    let obj = tracker.get(0).unwrap();
    assert_eq!(obj.history_len(), 20);
    assert_eq!(obj.centroid(), Point::new(105, 120));
    let xs: Vec<i32> = obj.history().map(|p| p.x).collect();
    assert!(xs.windows(2).all(|w| w[1] - w[0] == 5));
}

#[test]
fn test_reappearance_after_deregistration_gets_new_id() {
    let mut tracker = CentroidTracker::new(TrackerConfig {
        max_disappeared: 1,
        ..TrackerConfig::default()
    })
    .unwrap();
    tracker.update(&[Rect::new(0, 0, 10, 10)]);
    tracker.update(&[]);
    assert!(tracker.update(&[]).is_empty());

    let objects = tracker.update(&[Rect::new(0, 0, 10, 10)]);
    assert_eq!(ids(objects), vec![1]);
}

#[test]
fn test_reappearance_within_tolerance_keeps_id() {
    let mut tracker = CentroidTracker::new(TrackerConfig::default()).unwrap();
    tracker.update(&[Rect::new(0, 0, 10, 10)]);
    for _ in 0..10 {
        tracker.update(&[]);
    }
    let objects = tracker.update(&[Rect::new(20, 0, 30, 10)]);
    assert_eq!(ids(objects), vec![0]);
    assert_eq!(objects[0].disappeared(), 0);
    assert_eq!(objects[0].history_len(), 2);
}

#[test]
fn test_new_arrival_alongside_existing() {
    let mut tracker = CentroidTracker::new(TrackerConfig::default()).unwrap();
    tracker.update(&[Rect::new(0, 0, 10, 10)]);
    let objects = tracker.update(&[
        Rect::new(300, 300, 310, 310),
        Rect::new(2, 2, 12, 12),
        Rect::new(600, 0, 610, 10),
    ]);
    assert_eq!(ids(objects), vec![0, 1, 2]);
    assert_eq!(objects[0].centroid(), Point::new(7, 7));
    assert_eq!(objects[1].centroid(), Point::new(305, 305));
    assert_eq!(objects[2].centroid(), Point::new(605, 5));
}
