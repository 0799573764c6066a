use std::{fmt, str::FromStr};

use itertools::Itertools;
use nalgebra::Vector2;
use pathfinding::prelude::Matrix;
use serde::{Deserialize, Serialize};

use crate::{
    centroid_tracker::TrackedObject,
    detection::DetectedObject,
    error::{Error, Result, ensure_positive},
};

/// Assumed real-world height of a person, in centimeters.
pub const DEFAULT_OBJECT_HEIGHT: f64 = 170.0;

/// Which points of two boxes are compared when estimating their separation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DistanceMethodRepr")]
pub enum DistanceMethod {
    /// Distance between the two box centers.
    #[default]
    CenterPointsDistance,
    /// Smallest distance among the four pairs of matching corners.
    FourCornerPointsDistance,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DistanceMethodRepr {
    Code(i64),
    Name(String),
}

impl TryFrom<DistanceMethodRepr> for DistanceMethod {
    type Error = String;

    fn try_from(repr: DistanceMethodRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            DistanceMethodRepr::Code(1) => Ok(DistanceMethod::CenterPointsDistance),
            DistanceMethodRepr::Code(2) => Ok(DistanceMethod::FourCornerPointsDistance),
            DistanceMethodRepr::Code(code) => Err(format!("unknown distance method code {code}")),
            DistanceMethodRepr::Name(name) => name.parse(),
        }
    }
}

impl FromStr for DistanceMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "CenterPointsDistance" | "1" => Ok(DistanceMethod::CenterPointsDistance),
            "FourCornerPointsDistance" | "2" => Ok(DistanceMethod::FourCornerPointsDistance),
            _ => Err(format!("unknown distance method `{s}`")),
        }
    }
}

impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMethod::CenterPointsDistance => write!(f, "CenterPointsDistance"),
            DistanceMethod::FourCornerPointsDistance => write!(f, "FourCornerPointsDistance"),
        }
    }
}

/// Symmetric matrix of estimated distances in centimeters, zero on the diagonal.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    inner: Matrix<f64>,
}

impl DistanceMatrix {
    fn zeros(size: usize) -> Self {
        Self {
            inner: Matrix::new(size, size, 0.0),
        }
    }

    /// Builds a matrix from rows, which must form a square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut matrix = Self::zeros(size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(Error::NonSquareMatrix {
                    rows: size,
                    row_len: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                matrix.inner[(i, j)] = value;
            }
        }
        Ok(matrix)
    }

    /// Number of objects, i.e. rows and columns.
    pub fn len(&self) -> usize {
        self.inner.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.inner[(i, j)]
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.len())
            .map(|i| (0..self.len()).map(|j| self.get(i, j)).collect())
            .collect()
    }
}

/// Estimates physical distances between tracked objects from their pixel geometry.
///
/// Each object's pixel height stands in for its depth: a taller box is assumed closer
/// to the camera, so one pixel covers fewer centimeters there.
#[derive(Clone, Copy, Debug)]
pub struct DistanceEstimator {
    method: DistanceMethod,
    object_height: f64,
}

impl DistanceEstimator {
    pub fn new(method: DistanceMethod, object_height: f64) -> Result<Self> {
        Ok(Self {
            method,
            object_height: ensure_positive("object_height", object_height)?,
        })
    }

    pub fn method(&self) -> DistanceMethod {
        self.method
    }

    pub fn object_height(&self) -> f64 {
        self.object_height
    }

    pub fn estimate(&self, tracked_objects: &[TrackedObject]) -> DistanceMatrix {
        let objects: Vec<&DetectedObject> =
            tracked_objects.iter().map(TrackedObject::object).collect();
        let mut matrix = DistanceMatrix::zeros(objects.len());

        for (i, j) in (0..objects.len()).tuple_combinations() {
            let distance = self.distance_between(objects[i], objects[j]);
            matrix.inner[(i, j)] = distance;
            matrix.inner[(j, i)] = distance;
        }

        matrix
    }

    /// Estimated distance in centimeters between two objects with pixel geometry.
    pub fn distance_between(&self, first: &DetectedObject, second: &DetectedObject) -> f64 {
        match self.method {
            DistanceMethod::CenterPointsDistance => {
                let (first, second) = (first.centroid_real(), second.centroid_real());
                point_distance(
                    first.center(),
                    first.h,
                    second.center(),
                    second.h,
                    self.object_height,
                )
            }
            DistanceMethod::FourCornerPointsDistance => {
                let (first, second) = (first.bbox_real(), second.bbox_real());
                first
                    .corners()
                    .into_iter()
                    .zip(second.corners())
                    .map(|(a, b)| {
                        point_distance(a, first.height(), b, second.height(), self.object_height)
                    })
                    .fold(f64::INFINITY, f64::min)
            }
        }
    }
}

impl Default for DistanceEstimator {
    fn default() -> Self {
        Self {
            method: DistanceMethod::default(),
            object_height: DEFAULT_OBJECT_HEIGHT,
        }
    }
}

/// Distance between two points scaled by the mean centimeters-per-pixel of their objects.
///
/// Both heights are pixel heights and must be positive.
pub fn point_distance(
    first: Vector2<f64>,
    first_height: f64,
    second: Vector2<f64>,
    second_height: f64,
    object_height: f64,
) -> f64 {
    debug_assert!(first_height > 0.0 && second_height > 0.0);
    let scale = object_height * (1.0 / first_height + 1.0 / second_height) / 2.0;
    ((second - first) * scale).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bbox::Resolution, centroid_tracker::CentroidTracker, detection::Detection};
    use approx::assert_relative_eq;

    /// Pixel geometry on a 1000 x 1000 frame.
    fn object(bbox: [f64; 4]) -> DetectedObject {
        DetectedObject::new(
            Detection::new(bbox.map(|v| v / 1000.0), 0.9, 0),
            Resolution::new(1000, 1000).unwrap(),
        )
    }

    fn tracked(objects: &[DetectedObject]) -> Vec<TrackedObject> {
        CentroidTracker::default().update(objects)
    }

    #[test]
    fn test_point_distance_at_same_point_is_zero() {
        let point = Vector2::new(320.0, 240.0);

        assert_eq!(point_distance(point, 100.0, point, 100.0, 170.0), 0.0);
    }

    #[test]
    fn test_point_distance_scales_by_mean_inverse_height() {
        let distance = point_distance(
            Vector2::new(0.0, 0.0),
            100.0,
            Vector2::new(30.0, 40.0),
            50.0,
            170.0,
        );

        // 50 px * 170 * (1/100 + 1/50) / 2
        assert_relative_eq!(distance, 127.5, epsilon = 1e-9);
    }

    #[test]
    fn test_center_distance_for_identical_objects_is_zero() {
        let objects = tracked(&[
            object([100.0, 100.0, 200.0, 150.0]),
            object([100.0, 100.0, 200.0, 150.0]),
        ]);

        let matrix = DistanceEstimator::default().estimate(&objects);

        assert_eq!(matrix.get(0, 1), 0.0);
        assert_eq!(matrix.get(1, 0), 0.0);
    }

    #[test]
    fn test_center_distance_between_side_by_side_objects() {
        let objects = tracked(&[
            object([0.0, 0.0, 100.0, 50.0]),
            object([0.0, 100.0, 100.0, 150.0]),
        ]);

        let matrix = DistanceEstimator::default().estimate(&objects);

        // 100 px apart, 1.7 cm per pixel
        assert_relative_eq!(matrix.get(0, 1), 170.0, epsilon = 1e-9);
    }

    #[test]
    fn test_four_corner_distance_takes_closest_corners() {
        let first = object([0.0, 0.0, 100.0, 50.0]);
        let second = object([50.0, 100.0, 200.0, 150.0]);
        let estimator =
            DistanceEstimator::new(DistanceMethod::FourCornerPointsDistance, 170.0).unwrap();

        let distance = estimator.distance_between(&first, &second);

        // top corners: dx = 100, dy = 50, scale = 170 * (1/100 + 1/150) / 2
        let scale = 170.0 * (1.0 / 100.0 + 1.0 / 150.0) / 2.0;
        let expected = (100.0f64.powi(2) + 50.0f64.powi(2)).sqrt() * scale;
        assert_relative_eq!(distance, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_matrix_is_symmetric_with_zero_diagonal() {
        let objects = tracked(&[
            object([0.0, 0.0, 100.0, 50.0]),
            object([300.0, 200.0, 500.0, 300.0]),
            object([600.0, 700.0, 750.0, 760.0]),
        ]);

        for method in [
            DistanceMethod::CenterPointsDistance,
            DistanceMethod::FourCornerPointsDistance,
        ] {
            let matrix = DistanceEstimator::new(method, 170.0)
                .unwrap()
                .estimate(&objects);
            assert_eq!(matrix.len(), 3);
            for i in 0..3 {
                assert_eq!(matrix.get(i, i), 0.0);
                for j in 0..3 {
                    assert_eq!(matrix.get(i, j), matrix.get(j, i));
                    assert!(matrix.get(i, j) >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_empty_input_gives_empty_matrix() {
        let matrix = DistanceEstimator::default().estimate(&[]);

        assert!(matrix.is_empty());
        assert!(matrix.to_rows().is_empty());
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).is_err());
    }

    #[test]
    fn test_new_rejects_non_positive_height() {
        assert!(DistanceEstimator::new(DistanceMethod::CenterPointsDistance, 0.0).is_err());
        assert!(DistanceEstimator::new(DistanceMethod::CenterPointsDistance, -170.0).is_err());
    }

    #[test]
    fn test_distance_method_parses_names_and_legacy_codes() {
        assert_eq!("2".parse(), Ok(DistanceMethod::FourCornerPointsDistance));
        assert_eq!(
            "CenterPointsDistance".parse(),
            Ok(DistanceMethod::CenterPointsDistance)
        );
        assert!("Manhattan".parse::<DistanceMethod>().is_err());
    }
}
