//! Pixel to millimeter conversion from a known length picked on the image.

use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub first: na::Point2<f32>,
    pub second: na::Point2<f32>,
    pub length_mm: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            first: na::Point2::origin(),
            second: na::Point2::origin(),
            length_mm: 0.0,
        }
    }
}

impl Calibration {
    pub fn new(first: na::Point2<f32>, second: na::Point2<f32>, length_mm: f32) -> Self {
        Self {
            first,
            second,
            length_mm,
        }
    }

    #[inline]
    pub fn pixel_distance(&self) -> f32 {
        na::distance(&self.first, &self.second)
    }

    /// Millimeters per pixel, or `1.0` (stay in pixels) while either the
    /// reference length or the picked distance is zero.
    pub fn scaling_factor(&self) -> f32 {
        let px = self.pixel_distance();

        if self.length_mm == 0.0 || px == 0.0 {
            1.0
        } else {
            self.length_mm / px
        }
    }

    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.length_mm != 0.0 && self.pixel_distance() != 0.0
    }

    #[inline]
    pub fn scale_length(&self, px: f32) -> f32 {
        px * self.scaling_factor()
    }
}
