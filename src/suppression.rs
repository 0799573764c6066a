use itertools::Itertools;
use log::debug;

use crate::{
    bbox::BBox,
    detection::DetectedObject,
    error::{Result, ensure_non_negative},
};

pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.98;
pub const DEFAULT_BOX_OFFSET: f64 = 1.0;

/// Greedy duplicate suppression that favours boxes lower in the frame.
///
/// Boxes are visited by ascending bottom edge (`cy + h / 2`) and the last one is kept first,
/// so when two boxes overlap the one closer to the camera survives. A remaining box is
/// discarded when its intersection with the kept box, divided by its own area, exceeds
/// `overlap_threshold`. Both the intersection and the reference area widen every extent by
/// `box_offset`.
///
/// The defaults follow the legacy convention of adding one pixel to each extent, applied to
/// normalized coordinates. With `DEFAULT_BOX_OFFSET` the ratio is therefore not a plain
/// geometric overlap and the offset dominates for small boxes: at the 0.98 default, small
/// boxes sharing only about 60% of their area are already suppressed. Use a `box_offset`
/// of 0.0 for the plain ratio.
#[derive(Clone, Copy, Debug)]
pub struct DuplicateSuppressor {
    overlap_threshold: f64,
    box_offset: f64,
}

impl DuplicateSuppressor {
    pub fn new(overlap_threshold: f64, box_offset: f64) -> Result<Self> {
        Ok(Self {
            overlap_threshold: ensure_non_negative("overlap_threshold", overlap_threshold)?,
            box_offset: ensure_non_negative("box_offset", box_offset)?,
        })
    }

    pub fn overlap_threshold(&self) -> f64 {
        self.overlap_threshold
    }

    pub fn suppress(&self, objects: &[DetectedObject]) -> Vec<DetectedObject> {
        let mut remaining: Vec<usize> = (0..objects.len())
            .sorted_by(|&a, &b| {
                objects[a]
                    .centroid()
                    .bottom()
                    .total_cmp(&objects[b].centroid().bottom())
            })
            .collect();
        let mut picked = vec![false; objects.len()];

        while let Some(last) = remaining.pop() {
            picked[last] = true;
            let kept_bbox = objects[last].bbox();

            remaining = remaining
                .into_iter()
                .filter(|&i| self.overlap(&objects[i], kept_bbox) <= self.overlap_threshold)
                .collect();
        }

        let kept: Vec<DetectedObject> = objects
            .iter()
            .zip(picked)
            .filter_map(|(object, picked)| picked.then_some(*object))
            .collect();

        if kept.len() < objects.len() {
            debug!(
                "suppressed {} duplicate boxes out of {}",
                objects.len() - kept.len(),
                objects.len()
            );
        }
        kept
    }

    fn overlap(&self, object: &DetectedObject, kept_bbox: &BBox) -> f64 {
        let centroid = object.centroid();
        let reference_area = (centroid.w + self.box_offset) * (centroid.h + self.box_offset);
        if reference_area <= 0.0 {
            return 0.0;
        }
        object.bbox().intersection(kept_bbox, self.box_offset) / reference_area
    }
}

impl Default for DuplicateSuppressor {
    fn default() -> Self {
        Self {
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
            box_offset: DEFAULT_BOX_OFFSET,
        }
    }
}
