use pyo3::{PyRef, PyResult, pyclass, pymethods};

use crate::{
    Detection, Distancing, FrameResult, PostProcessorConfig,
    python_api::{PyDetection, PyTrackedObject},
};

#[pyclass(name = "FrameResult")]
pub struct PyFrameResult {
    #[pyo3(get)]
    pub distances: Vec<Vec<f64>>,
    #[pyo3(get)]
    pub violations: Vec<(usize, usize)>,
    #[pyo3(get)]
    pub violating_objects: Vec<bool>,
    #[pyo3(get)]
    pub environment_score: f64,
    pub objects: Vec<PyTrackedObject>,
}

#[pymethods]
impl PyFrameResult {
    #[getter]
    fn objects(&self) -> Vec<PyTrackedObject> {
        self.objects.clone()
    }
}

impl From<FrameResult> for PyFrameResult {
    fn from(result: FrameResult) -> Self {
        Self {
            distances: result.distances.to_rows(),
            violations: result.violations.pairs().to_vec(),
            violating_objects: result.violating_objects,
            environment_score: result.environment_score,
            objects: result
                .objects
                .into_iter()
                .map(PyTrackedObject::from)
                .collect(),
        }
    }
}

#[pyclass(name = "Distancing")]
pub struct PyDistancing {
    inner: Distancing,
}

#[pymethods]
impl PyDistancing {
    /// Builds the pipeline from a TOML config file, or from defaults when no path is given.
    #[new]
    #[pyo3(signature = (config_path=None))]
    pub fn new(config_path: Option<String>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => PostProcessorConfig::load(path)?,
            None => PostProcessorConfig::default(),
        };
        Ok(Self {
            inner: Distancing::new(&config)?,
        })
    }

    #[staticmethod]
    pub fn from_toml(contents: &str) -> PyResult<Self> {
        let config = PostProcessorConfig::from_toml_str(contents)?;
        Ok(Self {
            inner: Distancing::new(&config)?,
        })
    }

    pub fn process(&mut self, detections: Vec<PyRef<PyDetection>>) -> PyFrameResult {
        let inner_detections = detections
            .iter()
            .map(|detection| detection.inner)
            .collect::<Vec<Detection>>();

        self.inner.process(&inner_detections).into()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}
