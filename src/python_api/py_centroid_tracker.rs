use pyo3::{PyRef, PyResult, pyclass, pymethods};

use crate::{
    CentroidTracker, DetectedObject, Resolution,
    python_api::{PyDetection, PyTrackedObject},
};

#[pyclass(name = "CentroidTracker")]
pub struct PyCentroidTracker {
    inner: CentroidTracker,
    resolution: Resolution,
}

#[pymethods]
impl PyCentroidTracker {
    #[new]
    #[pyo3(signature = (max_disappeared=5, resolution=(640, 480)))]
    pub fn new(max_disappeared: u32, resolution: (u32, u32)) -> PyResult<Self> {
        Ok(Self {
            inner: CentroidTracker::new(max_disappeared),
            resolution: Resolution::new(resolution.0, resolution.1)?,
        })
    }

    pub fn get_tracked_objects(&self) -> Vec<PyTrackedObject> {
        self.inner
            .get_tracked_objects()
            .into_iter()
            .map(PyTrackedObject::from)
            .collect()
    }

    /// Detections are expected to be filtered and deduplicated already.
    pub fn update(&mut self, detections: Vec<PyRef<PyDetection>>) -> Vec<PyTrackedObject> {
        let objects = detections
            .iter()
            .map(|detection| DetectedObject::new(detection.inner, self.resolution))
            .filter(DetectedObject::has_usable_geometry)
            .collect::<Vec<DetectedObject>>();

        self.inner
            .update(&objects)
            .into_iter()
            .map(PyTrackedObject::from)
            .collect()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}
