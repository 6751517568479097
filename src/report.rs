//! Consumer side of a finished session: noise filtering, unit rescaling and
//! per-track exclusion on top of a measurement snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::ReportError;
use crate::measurement::{Measurement, MeasurementStore};
use crate::track::TrackId;

/// Speeds at or below this are treated as detector noise.
pub const DEFAULT_NOISE_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct Report {
    rows: BTreeMap<TrackId, Measurement>,
    disabled: BTreeSet<TrackId>,
    scale: f32,
}

impl Report {
    pub fn from_store(store: &MeasurementStore, noise_threshold: f32) -> Self {
        let rows = store
            .iter()
            .filter(|(_, m)| m.average_speed > noise_threshold)
            .map(|(id, m)| (id, *m))
            .collect();

        Self {
            rows,
            disabled: BTreeSet::new(),
            scale: 1.0,
        }
    }

    /// Switches lengths and speeds to `mm / pixels` units. Frame counts are
    /// not affected.
    pub fn rescale(&mut self, mm: f32, pixels: f32) -> Result<(), ReportError> {
        if !(mm > 0.0 && pixels > 0.0 && mm.is_finite() && pixels.is_finite()) {
            return Err(ReportError::InvalidScale { mm, pixels });
        }

        self.scale = mm / pixels;
        Ok(())
    }

    pub fn reset_scale(&mut self) {
        self.scale = 1.0;
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Excludes a track from further calculations. Returns `false` for ids
    /// not in the report.
    pub fn disable(&mut self, id: TrackId) -> bool {
        self.rows.contains_key(&id) && self.disabled.insert(id)
    }

    pub fn enable(&mut self, id: TrackId) -> bool {
        self.disabled.remove(&id)
    }

    #[inline]
    pub fn is_enabled(&self, id: TrackId) -> bool {
        self.rows.contains_key(&id) && !self.disabled.contains(&id)
    }

    fn scaled(&self, m: &Measurement) -> Measurement {
        Measurement {
            frame_count: m.frame_count,
            radius: m.radius * self.scale,
            cumulative_distance: m.cumulative_distance * self.scale,
            average_speed: m.average_speed * self.scale,
        }
    }

    /// All rows kept after filtering, in the current units.
    pub fn rows(&self) -> impl Iterator<Item = (TrackId, Measurement)> + '_ {
        self.rows.iter().map(move |(id, m)| (*id, self.scaled(m)))
    }

    /// Rows still taking part in calculations, in the current units.
    pub fn enabled_rows(&self) -> impl Iterator<Item = (TrackId, Measurement)> + '_ {
        self.rows().filter(move |(id, _)| !self.disabled.contains(id))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "id | frames | radius | distance | avg.speed")?;

        for (id, m) in self.rows() {
            let mark = if self.disabled.contains(&id) { " (disabled)" } else { "" };

            writeln!(
                f,
                "{:<4} {:<12} {:<10.2} {:<12.2} {:<11.2}{}",
                id, m.frame_count, m.radius, m.cumulative_distance, m.average_speed, mark
            )?;
        }

        Ok(())
    }
}
