mod associate;
mod bbox;
mod box_filter;
mod centroid_tracker;
mod config;
mod detection;
mod distance;
mod error;
mod pipeline;
#[cfg(feature = "python")]
mod python_api;
mod suppression;
mod violation;
pub use associate::associate_detections_to_tracks;
pub use bbox::{BBox, CentroidBox, Resolution};
pub use box_filter::BoxFilter;
pub use centroid_tracker::{CentroidTracker, TrackedObject};
pub use config::PostProcessorConfig;
pub use detection::{DetectedObject, Detection};
pub use distance::{DistanceEstimator, DistanceMatrix, DistanceMethod, point_distance};
pub use error::{Error, Result};
pub use pipeline::{Distancing, FrameResult};
pub use suppression::DuplicateSuppressor;
pub use violation::{
    ViolationExtractor, ViolationSet, environment_score, environment_score_with_crowd,
    nearest_distances,
};

#[cfg(feature = "python")]
use pyo3::{
    Bound, PyResult, pymodule,
    types::{PyModule, PyModuleMethods},
};

#[cfg(feature = "python")]
use crate::python_api::{
    PyBBox, PyCentroidTracker, PyDetection, PyDistancing, PyFrameResult, PyTrackedObject,
};

#[cfg(feature = "python")]
#[pymodule]
fn distancing(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBBox>()?;
    m.add_class::<PyDetection>()?;
    m.add_class::<PyTrackedObject>()?;
    m.add_class::<PyCentroidTracker>()?;
    m.add_class::<PyFrameResult>()?;
    m.add_class::<PyDistancing>()?;

    Ok(())
}
