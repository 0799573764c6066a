use pyo3::{pyclass, pymethods};

use crate::{Detection, python_api::PyBBox};

#[pyclass(name = "Detection")]
pub struct PyDetection {
    pub inner: Detection,
}

#[pymethods]
impl PyDetection {
    /// `bbox` is normalized `[ymin, xmin, ymax, xmax]`, as emitted by the detectors.
    #[new]
    #[pyo3(signature = (bbox, score, class_id=0))]
    pub fn new(bbox: [f64; 4], score: f64, class_id: u32) -> Self {
        Self {
            inner: Detection::new(bbox, score, class_id),
        }
    }

    #[getter]
    fn bbox(&self) -> PyBBox {
        PyBBox {
            inner: self.inner.bbox,
        }
    }

    #[getter]
    fn score(&self) -> f64 {
        self.inner.score
    }

    #[getter]
    fn class_id(&self) -> u32 {
        self.inner.class
    }
}
