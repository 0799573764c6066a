use log::debug;

use crate::{
    detection::DetectedObject,
    error::{Result, ensure_positive},
};

pub const DEFAULT_MAX_AREA_FRACTION: f64 = 0.25;

/// Drops boxes covering too much of the frame, along with boxes whose geometry is unusable.
#[derive(Clone, Copy, Debug)]
pub struct BoxFilter {
    max_area_fraction: f64,
}

impl BoxFilter {
    pub fn new(max_area_fraction: f64) -> Result<Self> {
        Ok(Self {
            max_area_fraction: ensure_positive("max_area_fraction", max_area_fraction)?,
        })
    }

    pub fn max_area_fraction(&self) -> f64 {
        self.max_area_fraction
    }

    pub fn filter(&self, objects: &[DetectedObject]) -> Vec<DetectedObject> {
        let kept: Vec<DetectedObject> = objects
            .iter()
            .filter(|object| object.has_usable_geometry())
            .filter(|object| object.centroid().area() <= self.max_area_fraction)
            .copied()
            .collect();

        if kept.len() < objects.len() {
            debug!(
                "box filter dropped {} of {} boxes",
                objects.len() - kept.len(),
                objects.len()
            );
        }
        kept
    }
}

impl Default for BoxFilter {
    fn default() -> Self {
        Self {
            max_area_fraction: DEFAULT_MAX_AREA_FRACTION,
        }
    }
}
