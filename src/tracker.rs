use std::collections::BTreeMap;
use std::collections::HashSet;
use std::io::BufRead;

use nalgebra as na;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::frame::{Frame, FrameReader};
use crate::measurement::{Measurement, MeasurementStore};
use crate::track::{Track, TrackId};
use crate::{Detection, TrackedDetection};

/// Allowed radius growth (exclusive) between a track and a detection.
const RADIUS_GROWTH_LIMIT: f32 = 3.0;

/// Rejects a match when the detected circle grew by `RADIUS_GROWTH_LIMIT`
/// or more over the radius recorded at track creation. Shrinking is never
/// rejected.
#[inline]
pub fn rejects_growth(detected_radius: f32, track_radius: f32) -> bool {
    detected_radius - RADIUS_GROWTH_LIMIT >= track_radius
}

/// One tracking session: the live tracks and the measurements of every track
/// seen so far.
#[derive(Debug)]
pub struct FrameTracker {
    tracking_distance: f32,
    next_id: u32,
    tracks: Vec<Track>,
    store: MeasurementStore,
}

impl FrameTracker {
    pub fn new(tracking_distance: f32) -> Self {
        Self {
            tracking_distance,
            next_id: 0,
            tracks: Vec::with_capacity(32),
            store: MeasurementStore::new(),
        }
    }

    #[inline]
    pub fn tracking_distance(&self) -> f32 {
        self.tracking_distance
    }

    /// Takes effect on the next `update`, live tracks are kept.
    #[inline]
    pub fn set_tracking_distance(&mut self, tracking_distance: f32) {
        self.tracking_distance = tracking_distance;
    }

    /// Live tracks in creation order.
    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[inline]
    pub fn measurements(&self) -> &MeasurementStore {
        &self.store
    }

    #[inline]
    pub fn snapshot(&self) -> BTreeMap<TrackId, Measurement> {
        self.store.snapshot()
    }

    /// Starts a new session: tracks, measurements and ids start over.
    pub fn reset(&mut self) {
        info!(
            tracks = self.tracks.len(),
            measurements = self.store.len(),
            "tracking session reset"
        );

        self.tracks.clear();
        self.store.clear();
        self.next_id = 0;
    }

    /// Ends the session, keeping only the measurements.
    pub fn finish(self) -> MeasurementStore {
        self.store
    }

    fn next_track_id(&mut self) -> TrackId {
        let id = TrackId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Index of the first track (in creation order) the detection belongs to.
    ///
    /// The scan stops at the first track within `tracking_distance`: if the
    /// radius guard rejects it, no later track is considered.
    fn find_match(&self, center: &na::Point2<f32>, radius: f32) -> Option<usize> {
        let (idx, track) = self
            .tracks
            .iter()
            .enumerate()
            .find(|(_, t)| t.distance_to(center) < self.tracking_distance)?;

        if rejects_growth(radius, track.measurement.radius) {
            debug!(
                track = %track.id,
                radius,
                track_radius = track.measurement.radius,
                "match rejected by radius growth"
            );
            return None;
        }

        Some(idx)
    }

    fn spawn(&mut self, center: na::Point2<f32>, radius: f32) -> TrackId {
        let id = self.next_track_id();
        let track = Track::new(id, center, radius);

        self.store.record(id, track.measurement);
        self.tracks.push(track);

        debug!(track = %id, x = center.x, y = center.y, radius, "track created");
        id
    }

    /// Assigns a track id to every detection of the frame.
    ///
    /// Tracks that got no detection in this frame are dropped; a later
    /// detection at the same place gets a new id.
    pub fn update(
        &mut self,
        detections: &[Detection],
        frame_rate_hz: f32,
        scaling_factor: f32,
    ) -> Vec<TrackedDetection> {
        let mut found = Vec::with_capacity(detections.len());
        let mut seen = HashSet::with_capacity(detections.len());

        for det in detections {
            let center = det.center();

            let id = match self.find_match(&center, det.r) {
                Some(idx) => {
                    let track = &mut self.tracks[idx];
                    if !track.advance(center, frame_rate_hz, scaling_factor) {
                        warn!(
                            track = %track.id,
                            frames = track.measurement.frame_count,
                            frame_rate_hz,
                            "elapsed time undefined, speed not updated"
                        );
                    }

                    self.store.record(track.id, track.measurement);
                    track.id
                }
                None => self.spawn(center, det.r),
            };

            seen.insert(id);
            found.push(det.tagged(id));
        }

        let before = self.tracks.len();
        self.tracks.retain(|t| seen.contains(&t.id));

        if before > self.tracks.len() {
            debug!(pruned = before - self.tracks.len(), live = self.tracks.len(), "tracks pruned");
        }

        found
    }
}

impl FrameTracker {
    /// Feeds every frame of a detection log through `update`, in log order.
    /// Returns the number of frames processed.
    pub fn replay<R, F>(
        &mut self,
        frames: FrameReader<R>,
        frame_rate_hz: f32,
        scaling_factor: f32,
        mut on_frame: F,
    ) -> Result<usize, Error>
    where
        R: BufRead,
        F: FnMut(&Frame, &[TrackedDetection]),
    {
        let mut count = 0;

        for frame in frames {
            let frame = frame?;
            let found = self.update(&frame.detections, frame_rate_hz, scaling_factor);

            on_frame(&frame, &found);
            count += 1;
        }

        Ok(count)
    }
}

impl crate::Tracking for FrameTracker {
    #[inline]
    fn update(
        &mut self,
        detections: &[Detection],
        frame_rate_hz: f32,
        scaling_factor: f32,
    ) -> Vec<TrackedDetection> {
        FrameTracker::update(self, detections, frame_rate_hz, scaling_factor)
    }

    #[inline]
    fn snapshot(&self) -> BTreeMap<TrackId, Measurement> {
        FrameTracker::snapshot(self)
    }
}
