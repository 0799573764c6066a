use crate::bbox::{BBox, CentroidBox, Resolution};

/// A raw detector candidate for one frame, in normalized coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub bbox: BBox,
    pub score: f64,
    pub class: u32,
}

impl Detection {
    /// Creates a detection from the detector layout `[ymin, xmin, ymax, xmax]`.
    pub fn new(bbox: [f64; 4], score: f64, class: u32) -> Self {
        Self {
            bbox: BBox::from_detector_layout(bbox),
            score,
            class,
        }
    }
}

/// A detection with its derived geometry, normalized and in pixels.
///
/// The derived fields are computed once from the corner box and are read-only,
/// so the centroid can never drift from the corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectedObject {
    detection: Detection,
    centroid: CentroidBox,
    bbox_real: BBox,
    centroid_real: CentroidBox,
}

impl DetectedObject {
    pub fn new(detection: Detection, resolution: Resolution) -> Self {
        let bbox_real = detection.bbox.scale(resolution);
        Self {
            detection,
            centroid: detection.bbox.centroid(),
            bbox_real,
            centroid_real: bbox_real.centroid(),
        }
    }

    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    pub fn bbox(&self) -> &BBox {
        &self.detection.bbox
    }

    pub fn score(&self) -> f64 {
        self.detection.score
    }

    pub fn class(&self) -> u32 {
        self.detection.class
    }

    pub fn centroid(&self) -> &CentroidBox {
        &self.centroid
    }

    pub fn bbox_real(&self) -> &BBox {
        &self.bbox_real
    }

    pub fn centroid_real(&self) -> &CentroidBox {
        &self.centroid_real
    }

    /// Whether the geometry is finite and has a positive extent on both axes.
    pub fn has_usable_geometry(&self) -> bool {
        self.detection.bbox.is_finite()
            && self.centroid.w > 0.0
            && self.centroid.h > 0.0
            && self.centroid_real.h > 0.0
    }
}
