use approx::assert_relative_eq;
use std::io::{BufReader, Write};

use spheretrack::{
    Detection, FrameReader, FrameTracker, Measurement, Report, TrackId, Tracking,
};

fn det(x: f32, y: f32, r: f32) -> Detection {
    Detection::new(x, y, r)
}

#[test]
fn two_frame_scenario() {
    let mut tracker = FrameTracker::new(25.0);

    let found = tracker.update(&[det(0.0, 0.0, 5.0)], 50.0, 1.0);
    assert_eq!(found.len(), 1);
    assert_eq!((found[0].x, found[0].y, found[0].r), (0.0, 0.0, 5.0));
    assert_eq!(found[0].track_id, TrackId(0));
    assert_eq!(tracker.snapshot()[&TrackId(0)], Measurement::new(5.0));

    let found = tracker.update(&[det(1.0, 1.0, 5.0)], 50.0, 1.0);
    assert_eq!(found, vec![det(1.0, 1.0, 5.0).tagged(TrackId(0))]);

    let m = tracker.snapshot()[&TrackId(0)];
    assert_eq!(m.frame_count, 1);
    assert_eq!(m.radius, 5.0);
    assert!(m.cumulative_distance > 0.0);
}

#[test]
fn slow_object_keeps_its_id() {
    let mut tracker = FrameTracker::new(25.0);
    let mut last_distance = 0.0;

    for i in 0..40 {
        let y = i as f32 * 7.0;
        // radius wobbles and shrinks but never grows by 3
        let r = 10.0 + (i % 3) as f32 - (i / 10) as f32;
        let found = tracker.update(&[det(100.0, y, r)], 50.0, 1.0);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].track_id, TrackId(0));

        let m = tracker.snapshot()[&TrackId(0)];
        assert_eq!(m.frame_count, i);
        assert_eq!(m.radius, 10.0);
        assert!(m.cumulative_distance >= last_distance);
        last_distance = m.cumulative_distance;
    }
}

#[test]
fn one_missing_frame_changes_id() {
    let mut tracker = FrameTracker::new(25.0);

    tracker.update(&[det(50.0, 50.0, 8.0)], 50.0, 1.0);
    tracker.update(&[det(50.0, 52.0, 8.0)], 50.0, 1.0);
    let found = tracker.update(&[], 50.0, 1.0);
    assert!(found.is_empty());
    assert!(tracker.tracks().is_empty());

    let found = tracker.update(&[det(50.0, 52.0, 8.0)], 50.0, 1.0);
    assert_eq!(found[0].track_id, TrackId(1));

    // the lost track's values survive pruning
    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[&TrackId(0)].frame_count, 1);
}

#[test]
fn grown_detection_spawns_new_track() {
    let mut tracker = FrameTracker::new(25.0);
    tracker.update(&[det(0.0, 0.0, 10.0)], 50.0, 1.0);

    let found = tracker.update(&[det(2.0, 2.0, 14.0)], 50.0, 1.0);
    assert_eq!(found[0].track_id, TrackId(1));

    let snapshot = tracker.snapshot();
    assert_eq!(snapshot[&TrackId(0)].frame_count, 0);
    assert_eq!(snapshot[&TrackId(1)].radius, 14.0);
}

#[test]
fn several_objects_are_told_apart() {
    let mut tracker = FrameTracker::new(20.0);

    for i in 0..10 {
        let y = i as f32 * 5.0;
        let found = tracker.update(
            &[det(300.0, y, 6.0), det(100.0, y * 2.0, 9.0), det(500.0, 10.0, 7.0)],
            30.0,
            1.0,
        );

        let ids: Vec<_> = found.iter().map(|d| d.track_id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    let snapshot = tracker.snapshot();
    assert_relative_eq!(snapshot[&TrackId(0)].cumulative_distance, 45.0);
    assert_relative_eq!(snapshot[&TrackId(1)].cumulative_distance, 90.0);
    assert_eq!(snapshot[&TrackId(2)].cumulative_distance, 0.0);
    // 40 px before the last step, 9 frames at 30 Hz
    assert_relative_eq!(snapshot[&TrackId(0)].average_speed, 40.0 / (9.0 / 30.0));
}

#[test]
fn snapshot_is_read_only() {
    let mut tracker = FrameTracker::new(25.0);
    tracker.update(&[det(0.0, 0.0, 5.0), det(90.0, 0.0, 5.0)], 50.0, 1.0);
    tracker.update(&[det(0.0, 3.0, 5.0)], 50.0, 1.0);

    let first = Tracking::snapshot(&tracker);
    let second = tracker.snapshot();
    assert_eq!(first, second);
    assert_eq!(tracker.measurements().snapshot(), first);
}

#[test]
fn scaling_factor_only_affects_live_speed() {
    let mut plain = FrameTracker::new(25.0);
    let mut scaled = FrameTracker::new(25.0);

    for i in 0..5 {
        let frame = [det(0.0, i as f32 * 4.0, 5.0)];
        plain.update(&frame, 50.0, 1.0);
        scaled.update(&frame, 50.0, 0.25);
    }

    assert_eq!(plain.snapshot(), scaled.snapshot());
    assert_relative_eq!(scaled.tracks()[0].scaled_speed, plain.tracks()[0].scaled_speed * 0.25);
}

#[test]
fn replay_from_log_to_report() {
    let mut log = tempfile::NamedTempFile::new().unwrap();
    for i in 0..6 {
        writeln!(
            log,
            "{}:[{{\"x\":200,\"y\":{},\"r\":12}},{{\"x\":40,\"y\":40,\"r\":5}}]",
            i,
            i * 10
        )
        .unwrap();
    }
    log.flush().unwrap();

    let file = std::fs::File::open(log.path()).unwrap();
    let mut tracker = FrameTracker::new(25.0);

    for frame in FrameReader::new(BufReader::new(file)) {
        let frame = frame.unwrap();
        tracker.update(&frame.detections, 50.0, 1.0);
    }

    let store = tracker.finish();
    assert_eq!(store.len(), 2);

    // the resting sphere never moves and is filtered out as noise
    let report = Report::from_store(&store, 0.1);
    let rows: Vec<_> = report.enabled_rows().collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, TrackId(0));
    assert_eq!(rows[0].1.frame_count, 5);
}
