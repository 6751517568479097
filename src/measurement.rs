use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::track::TrackId;

/// Statistics accumulated for one track. `average_speed` is in pixels per
/// second, before any scaling factor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub frame_count: u32,
    pub radius: f32,
    pub cumulative_distance: f32,
    pub average_speed: f32,
}

impl Measurement {
    #[inline]
    pub fn new(radius: f32) -> Self {
        Self {
            frame_count: 0,
            radius,
            cumulative_distance: 0.0,
            average_speed: 0.0,
        }
    }
}

/// Last known measurement of every track of a session, including tracks
/// that were already pruned from the live set.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct MeasurementStore {
    entries: BTreeMap<TrackId, Measurement>,
}

impl MeasurementStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record(&mut self, id: TrackId, measurement: Measurement) {
        self.entries.insert(id, measurement);
    }

    #[inline]
    pub fn get(&self, id: TrackId) -> Option<&Measurement> {
        self.entries.get(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (TrackId, &Measurement)> {
        self.entries.iter().map(|(id, m)| (*id, m))
    }

    pub fn snapshot(&self) -> BTreeMap<TrackId, Measurement> {
        self.entries.clone()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
