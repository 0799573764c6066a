use pyo3::{pyclass, pymethods};

use crate::{CentroidBox, TrackedObject, python_api::PyBBox};

#[pyclass(name = "TrackedObject")]
#[derive(Clone)]
pub struct PyTrackedObject {
    inner: TrackedObject,
}

impl From<TrackedObject> for PyTrackedObject {
    fn from(inner: TrackedObject) -> Self {
        Self { inner }
    }
}

fn centroid_tuple(centroid: &CentroidBox) -> (f64, f64, f64, f64) {
    (centroid.cx, centroid.cy, centroid.w, centroid.h)
}

#[pymethods]
impl PyTrackedObject {
    #[getter]
    fn track_id(&self) -> u64 {
        self.inner.track_id()
    }

    #[getter]
    fn class_id(&self) -> u32 {
        self.inner.object().class()
    }

    #[getter]
    fn score(&self) -> f64 {
        self.inner.object().score()
    }

    #[getter]
    fn disappeared(&self) -> u32 {
        self.inner.disappeared()
    }

    #[getter]
    fn bbox(&self) -> PyBBox {
        PyBBox {
            inner: *self.inner.object().bbox(),
        }
    }

    #[getter]
    fn bbox_real(&self) -> PyBBox {
        PyBBox {
            inner: *self.inner.object().bbox_real(),
        }
    }

    /// `(cx, cy, w, h)` in normalized coordinates.
    #[getter]
    fn centroid(&self) -> (f64, f64, f64, f64) {
        centroid_tuple(self.inner.object().centroid())
    }

    /// `(cx, cy, w, h)` in pixels.
    #[getter]
    fn centroid_real(&self) -> (f64, f64, f64, f64) {
        centroid_tuple(self.inner.object().centroid_real())
    }

    fn __repr__(&self) -> String {
        format!(
            "TrackedObject(track_id={}, class_id={}, score={}, disappeared={})",
            self.track_id(),
            self.class_id(),
            self.score(),
            self.disappeared()
        )
    }
}
