use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

use crate::measurement::Measurement;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    pub id: TrackId,

    // corner-biased center of the last matched detection, in px
    pub center: na::Point2<f32>,

    pub measurement: Measurement,

    // average speed multiplied by the scaling factor of the last update
    pub scaled_speed: f32,
}

impl Track {
    pub fn new(id: TrackId, center: na::Point2<f32>, radius: f32) -> Self {
        Self {
            id,
            center,
            measurement: Measurement::new(radius),
            scaled_speed: 0.0,
        }
    }

    #[inline]
    pub fn distance_to(&self, point: &na::Point2<f32>) -> f32 {
        na::distance(&self.center, point)
    }

    /// Seconds covered by `frame_count` frames, `None` when that is not a
    /// usable divisor.
    #[inline]
    pub fn elapsed(frame_count: u32, frame_rate_hz: f32) -> Option<f32> {
        if frame_count == 0 || !frame_rate_hz.is_finite() || frame_rate_hz <= 0.0 {
            return None;
        }

        Some(frame_count as f32 / frame_rate_hz)
    }

    /// Moves the track to `center` and folds the step into its statistics.
    ///
    /// Both speeds divide the distance accumulated *before* this step by the
    /// elapsed time *including* it. Returns `false` when the elapsed time is
    /// undefined; counts and distance are updated anyway and the speeds keep
    /// their previous values.
    pub fn advance(
        &mut self,
        center: na::Point2<f32>,
        frame_rate_hz: f32,
        scaling_factor: f32,
    ) -> bool {
        let step = self.distance_to(&center);
        let base = self.measurement.cumulative_distance;

        self.center = center;
        self.measurement.frame_count += 1;
        self.measurement.cumulative_distance = base + step;

        match Self::elapsed(self.measurement.frame_count, frame_rate_hz) {
            Some(elapsed) => {
                self.measurement.average_speed = base / elapsed;
                self.scaled_speed = scaling_factor * base / elapsed;
                true
            }
            None => false,
        }
    }
}
