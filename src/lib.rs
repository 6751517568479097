pub mod calibration;
pub mod detection;
pub mod error;
pub mod frame;
pub mod measurement;
pub mod report;
pub mod settings;
pub mod tracker;

mod track;

pub use calibration::Calibration;
pub use detection::{Detection, TrackedDetection};
pub use frame::{Frame, FrameReader};
pub use measurement::{Measurement, MeasurementStore};
pub use report::Report;
pub use settings::Settings;
pub use track::{Track, TrackId};
pub use tracker::FrameTracker;

use std::collections::BTreeMap;

/// Per-frame identity assignment. Calls must be serialized by the caller,
/// one frame at a time in capture order.
pub trait Tracking {
    fn update(
        &mut self,
        detections: &[Detection],
        frame_rate_hz: f32,
        scaling_factor: f32,
    ) -> Vec<TrackedDetection>;

    fn snapshot(&self) -> BTreeMap<TrackId, Measurement>;
}
