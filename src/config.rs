use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    bbox::Resolution,
    box_filter::{BoxFilter, DEFAULT_MAX_AREA_FRACTION},
    centroid_tracker::{CentroidTracker, DEFAULT_MAX_DISAPPEARED},
    distance::{DEFAULT_OBJECT_HEIGHT, DistanceEstimator, DistanceMethod},
    error::Result,
    suppression::{DEFAULT_BOX_OFFSET, DEFAULT_OVERLAP_THRESHOLD, DuplicateSuppressor},
    violation::ViolationExtractor,
};

pub const DEFAULT_DIST_THRESHOLD: f64 = 150.0;

/// Tunables of the post-processing stages, keyed like the `[PostProcessor]` config section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PostProcessorConfig {
    pub max_track_frame: u32,
    #[serde(rename = "NMSThreshold")]
    pub nms_threshold: f64,
    #[serde(rename = "NMSBoxOffset")]
    pub nms_box_offset: f64,
    pub max_area_fraction: f64,
    pub dist_method: DistanceMethod,
    /// Centimeters.
    pub dist_threshold: f64,
    /// Assumed real-world object height in centimeters.
    pub object_height: f64,
    pub resolution: Resolution,
}

impl Default for PostProcessorConfig {
    fn default() -> Self {
        Self {
            max_track_frame: DEFAULT_MAX_DISAPPEARED,
            nms_threshold: DEFAULT_OVERLAP_THRESHOLD,
            nms_box_offset: DEFAULT_BOX_OFFSET,
            max_area_fraction: DEFAULT_MAX_AREA_FRACTION,
            dist_method: DistanceMethod::default(),
            dist_threshold: DEFAULT_DIST_THRESHOLD,
            object_height: DEFAULT_OBJECT_HEIGHT,
            resolution: Resolution::default(),
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(rename = "PostProcessor", default)]
    post_processor: PostProcessorConfig,
}

impl PostProcessorConfig {
    /// Parses the `[PostProcessor]` table of a TOML document and validates it.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        file.post_processor.validate()?;
        Ok(file.post_processor)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Checks every value by building the stages it configures.
    pub fn validate(&self) -> Result<()> {
        self.box_filter()?;
        self.duplicate_suppressor()?;
        self.distance_estimator()?;
        self.violation_extractor()?;
        Ok(())
    }

    pub fn box_filter(&self) -> Result<BoxFilter> {
        BoxFilter::new(self.max_area_fraction)
    }

    pub fn duplicate_suppressor(&self) -> Result<DuplicateSuppressor> {
        DuplicateSuppressor::new(self.nms_threshold, self.nms_box_offset)
    }

    pub fn tracker(&self) -> CentroidTracker {
        CentroidTracker::new(self.max_track_frame)
    }

    pub fn distance_estimator(&self) -> Result<DistanceEstimator> {
        DistanceEstimator::new(self.dist_method, self.object_height)
    }

    pub fn violation_extractor(&self) -> Result<ViolationExtractor> {
        ViolationExtractor::new(self.dist_threshold)
    }
}
