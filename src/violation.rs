use std::collections::BTreeSet;

use itertools::Itertools;
use log::debug;

use crate::{
    distance::DistanceMatrix,
    error::{Result, ensure_non_negative},
};

/// Maximum number of people that fit in the scene while keeping their distance.
pub const MAX_ACCEPTABLE_CAPACITY: usize = 10;
/// Maximum number of people in the scene.
pub const MAX_CAPACITY: usize = 20;

/// Unordered pairs of objects closer than the threshold, stored as `(i, j)` with `i < j`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViolationSet {
    pairs: Vec<(usize, usize)>,
}

impl ViolationSet {
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        let pair = if i < j { (i, j) } else { (j, i) };
        self.pairs.binary_search(&pair).is_ok()
    }

    /// Every object index that takes part in at least one violation.
    pub fn violating_indices(&self) -> BTreeSet<usize> {
        self.pairs.iter().flat_map(|&(i, j)| [i, j]).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(usize, usize)> {
        self.pairs.iter()
    }
}

/// Finds pairs of objects standing closer than a distance threshold.
#[derive(Clone, Copy, Debug)]
pub struct ViolationExtractor {
    threshold: f64,
}

impl ViolationExtractor {
    pub fn new(threshold: f64) -> Result<Self> {
        Ok(Self {
            threshold: ensure_non_negative("dist_threshold", threshold)?,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Scans the strict upper triangle only, so self pairs and mirrored pairs never appear.
    pub fn extract(&self, distances: &DistanceMatrix) -> ViolationSet {
        let pairs: Vec<(usize, usize)> = (0..distances.len())
            .tuple_combinations()
            .filter(|&(i, j)| distances.get(i, j) < self.threshold)
            .collect();

        if !pairs.is_empty() {
            debug!(
                "{} violating pairs among {} objects",
                pairs.len(),
                distances.len()
            );
        }
        ViolationSet { pairs }
    }

    /// Per object, whether its nearest neighbour is closer than the threshold.
    pub fn violating_objects(&self, distances: &DistanceMatrix) -> Vec<bool> {
        nearest_distances(distances)
            .into_iter()
            .map(|nearest| nearest.is_some_and(|distance| distance < self.threshold))
            .collect()
    }
}

/// Distance from each object to its closest neighbour, `None` for an object on its own.
pub fn nearest_distances(distances: &DistanceMatrix) -> Vec<Option<f64>> {
    (0..distances.len())
        .map(|i| {
            (0..distances.len())
                .filter(|&j| j != i)
                .map(|j| distances.get(i, j))
                .min_by(f64::total_cmp)
        })
        .collect()
}

/// Scene safety score in `[0, 1]` from the number of violations alone.
pub fn environment_score(violating: usize) -> f64 {
    1.0 - (violating as f64 / MAX_CAPACITY as f64).min(1.0)
}

/// Scene safety score in `[0, 1]` that also penalises crowding.
pub fn environment_score_with_crowd(detected: usize, violating: usize) -> f64 {
    let capacity = (MAX_CAPACITY + MAX_ACCEPTABLE_CAPACITY) as f64;
    1.0 - ((violating + detected) as f64 / capacity).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> DistanceMatrix {
        DistanceMatrix::from_rows(rows).unwrap()
    }

    fn sample() -> DistanceMatrix {
        matrix(vec![
            vec![0.0, 50.0, 200.0],
            vec![50.0, 0.0, 150.0],
            vec![200.0, 150.0, 0.0],
        ])
    }

    #[test]
    fn test_extract_returns_upper_triangle_pairs_only() {
        let violations = ViolationExtractor::new(100.0).unwrap().extract(&sample());

        assert_eq!(violations.pairs(), &[(0, 1)]);
        assert!(violations.contains(1, 0));
        assert!(!violations.contains(1, 2));
    }

    #[test]
    fn test_extract_never_reports_self_pairs() {
        let violations = ViolationExtractor::new(1000.0).unwrap().extract(&sample());

        assert_eq!(violations.pairs(), &[(0, 1), (0, 2), (1, 2)]);
        assert!(violations.iter().all(|&(i, j)| i < j));
    }

    #[test]
    fn test_extract_on_single_object_is_empty() {
        let violations = ViolationExtractor::new(100.0)
            .unwrap()
            .extract(&matrix(vec![vec![0.0]]));

        assert!(violations.is_empty());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let violations = ViolationExtractor::new(50.0).unwrap().extract(&sample());

        assert!(violations.is_empty());
    }

    #[test]
    fn test_violating_indices_and_objects() {
        let extractor = ViolationExtractor::new(100.0).unwrap();

        let violations = extractor.extract(&sample());

        assert_eq!(violations.violating_indices(), BTreeSet::from([0, 1]));
        assert_eq!(
            extractor.violating_objects(&sample()),
            vec![true, true, false]
        );
    }

    #[test]
    fn test_nearest_distances() {
        assert_eq!(
            nearest_distances(&sample()),
            vec![Some(50.0), Some(50.0), Some(150.0)]
        );
        assert_eq!(nearest_distances(&matrix(vec![vec![0.0]])), vec![None]);
    }

    #[test]
    fn test_environment_scores() {
        assert_eq!(environment_score(0), 1.0);
        assert_eq!(environment_score(5), 0.75);
        assert_eq!(environment_score(40), 0.0);
        assert_eq!(environment_score_with_crowd(3, 0), 0.9);
        assert_eq!(environment_score_with_crowd(30, 10), 0.0);
    }

    #[test]
    fn test_new_rejects_negative_threshold() {
        assert!(ViolationExtractor::new(-1.0).is_err());
    }
}
