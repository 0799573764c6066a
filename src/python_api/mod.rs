mod py_bbox;
mod py_centroid_tracker;
mod py_detection;
mod py_distancing;
mod py_tracked_object;

use pyo3::{PyErr, exceptions::PyValueError};

pub use py_bbox::PyBBox;
pub use py_centroid_tracker::PyCentroidTracker;
pub use py_detection::PyDetection;
pub use py_distancing::{PyDistancing, PyFrameResult};
pub use py_tracked_object::PyTrackedObject;

use crate::Error;

impl From<Error> for PyErr {
    fn from(err: Error) -> Self {
        PyValueError::new_err(err.to_string())
    }
}
