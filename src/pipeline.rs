use log::{debug, trace};

use crate::{
    bbox::Resolution,
    box_filter::BoxFilter,
    centroid_tracker::{CentroidTracker, TrackedObject},
    config::PostProcessorConfig,
    detection::{DetectedObject, Detection},
    distance::{DistanceEstimator, DistanceMatrix},
    error::Result,
    suppression::DuplicateSuppressor,
    violation::{ViolationExtractor, ViolationSet, environment_score_with_crowd},
};

/// Post-processing output for one frame.
///
/// Matrix rows and violation indices refer to positions in `objects`.
#[derive(Clone, Debug)]
pub struct FrameResult {
    pub objects: Vec<TrackedObject>,
    pub distances: DistanceMatrix,
    pub violations: ViolationSet,
    pub violating_objects: Vec<bool>,
    pub environment_score: f64,
}

/// Runs filtering, duplicate suppression, tracking and distance scoring on each frame
/// of a single video stream.
#[derive(Debug)]
pub struct Distancing {
    resolution: Resolution,
    box_filter: BoxFilter,
    suppressor: DuplicateSuppressor,
    tracker: CentroidTracker,
    estimator: DistanceEstimator,
    extractor: ViolationExtractor,
}

impl Distancing {
    pub fn new(config: &PostProcessorConfig) -> Result<Self> {
        debug!(
            "post-processing at {}x{} using {}",
            config.resolution.width(),
            config.resolution.height(),
            config.dist_method
        );
        Ok(Self {
            resolution: config.resolution,
            box_filter: config.box_filter()?,
            suppressor: config.duplicate_suppressor()?,
            tracker: config.tracker(),
            estimator: config.distance_estimator()?,
            extractor: config.violation_extractor()?,
        })
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    /// Forgets all tracked objects, e.g. before starting a new video.
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    pub fn process(&mut self, detections: &[Detection]) -> FrameResult {
        let objects: Vec<DetectedObject> = detections
            .iter()
            .map(|detection| DetectedObject::new(*detection, self.resolution))
            .collect();

        let objects = self.box_filter.filter(&objects);
        let objects = self.suppressor.suppress(&objects);
        let tracked_objects = self.tracker.update(&objects);

        let distances = self.estimator.estimate(&tracked_objects);
        let violations = self.extractor.extract(&distances);
        let violating_objects = self.extractor.violating_objects(&distances);
        let environment_score =
            environment_score_with_crowd(tracked_objects.len(), violations.len());

        trace!(
            "{} detections -> {} tracked objects, {} violations",
            detections.len(),
            tracked_objects.len(),
            violations.len()
        );

        FrameResult {
            objects: tracked_objects,
            distances,
            violations,
            violating_objects,
            environment_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PostProcessorConfig {
        PostProcessorConfig {
            resolution: Resolution::new(1000, 1000).unwrap(),
            dist_threshold: 150.0,
            ..PostProcessorConfig::default()
        }
    }

    #[test]
    fn test_process_drops_large_and_duplicate_boxes() {
        let mut distancing = Distancing::new(&config()).unwrap();

        let result = distancing.process(&[
            Detection::new([0.0, 0.0, 0.9, 0.9], 0.6, 0),
            Detection::new([0.1, 0.1, 0.3, 0.2], 0.9, 0),
            Detection::new([0.1, 0.1, 0.3, 0.2], 0.8, 0),
        ]);

        assert_eq!(result.objects.len(), 1);
        assert_eq!(result.distances.len(), 1);
        assert!(result.violations.is_empty());
        assert_eq!(result.violating_objects, vec![false]);
    }

    #[test]
    fn test_process_flags_close_pairs() {
        let mut distancing = Distancing::new(&config()).unwrap();

        // two 200 px tall boxes 100 px apart (85 cm) and one far away
        let result = distancing.process(&[
            Detection::new([0.1, 0.1, 0.3, 0.15], 0.9, 0),
            Detection::new([0.1, 0.2, 0.3, 0.25], 0.9, 0),
            Detection::new([0.6, 0.8, 0.8, 0.85], 0.9, 0),
        ]);

        assert_eq!(result.objects.len(), 3);
        assert_eq!(result.violations.pairs(), &[(0, 1)]);
        assert_eq!(result.violating_objects, vec![true, true, false]);
        assert_eq!(result.environment_score, 1.0 - 4.0 / 30.0);
    }

    #[test]
    fn test_reset_clears_tracks() {
        let mut distancing = Distancing::new(&config()).unwrap();
        distancing.process(&[Detection::new([0.1, 0.1, 0.3, 0.15], 0.9, 0)]);

        distancing.reset();

        assert!(distancing.tracker().is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PostProcessorConfig {
            dist_threshold: -1.0,
            ..config()
        };

        assert!(Distancing::new(&config).is_err());
    }
}
