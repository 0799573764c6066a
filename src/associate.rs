use itertools::Itertools;
use nalgebra::Vector2;
use pathfinding::prelude::Matrix;

/// Greedily associates the given detections to the given tracks by centroid distance.
///
/// ## Args
///  - track_centers: Centroids of the currently tracked objects, one row per track.
///  - detection_centers: Centroids of the current frame's detections, one column per detection.
///
/// Every track proposes its nearest detection. Tracks are resolved in ascending order of
/// that nearest distance, and a proposal is accepted only while neither the track nor the
/// proposed detection has been claimed. A track whose nearest detection was already taken
/// stays unmatched; it does not fall back to its second choice.
///
/// Returns `(matched, unmatched_detections, unmatched_tracks)` where `matched` holds
/// `(detection_index, track_index)` pairs in resolution order.
pub fn associate_detections_to_tracks(
    track_centers: &[Vector2<f64>],
    detection_centers: &[Vector2<f64>],
) -> (Vec<(usize, usize)>, Vec<usize>, Vec<usize>) {
    if track_centers.is_empty() || detection_centers.is_empty() {
        return (
            Vec::new(),
            (0..detection_centers.len()).collect(),
            (0..track_centers.len()).collect(),
        );
    }

    let distance_matrix = calc_distance_matrix(track_centers, detection_centers);
    let proposals = nearest_detections(&distance_matrix);

    let mut used_tracks = vec![false; distance_matrix.rows];
    let mut used_detections = vec![false; distance_matrix.columns];
    let mut matched = Vec::new();

    for (track_index, (detection_index, _)) in proposals
        .iter()
        .enumerate()
        .sorted_by(|(_, (_, a)), (_, (_, b))| a.total_cmp(b))
    {
        if used_tracks[track_index] || used_detections[*detection_index] {
            continue;
        }
        used_tracks[track_index] = true;
        used_detections[*detection_index] = true;
        matched.push((*detection_index, track_index));
    }

    let unmatched_detections = unused_indices(&used_detections);
    let unmatched_tracks = unused_indices(&used_tracks);

    (matched, unmatched_detections, unmatched_tracks)
}

/// Pairwise euclidean distance, tracks as rows and detections as columns.
fn calc_distance_matrix(
    track_centers: &[Vector2<f64>],
    detection_centers: &[Vector2<f64>],
) -> Matrix<f64> {
    let mut matrix = Matrix::new(track_centers.len(), detection_centers.len(), 0.0);

    for (i, track_center) in track_centers.iter().enumerate() {
        for (j, detection_center) in detection_centers.iter().enumerate() {
            matrix[(i, j)] = (track_center - detection_center).norm();
        }
    }

    matrix
}

/// For every row, the first column holding the row minimum and that minimum.
fn nearest_detections(distance_matrix: &Matrix<f64>) -> Vec<(usize, f64)> {
    (0..distance_matrix.rows)
        .map(|row| {
            let column = (0..distance_matrix.columns)
                .position_min_by(|&a, &b| {
                    distance_matrix[(row, a)].total_cmp(&distance_matrix[(row, b)])
                })
                .unwrap_or_default();
            (column, distance_matrix[(row, column)])
        })
        .collect()
}

fn unused_indices(used: &[bool]) -> Vec<usize> {
    used.iter()
        .enumerate()
        .filter_map(|(index, &used)| (!used).then_some(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<Vector2<f64>> {
        coords.iter().map(|&(x, y)| Vector2::new(x, y)).collect()
    }

    #[test]
    fn test_associate_returns_nearest_matching() {
        let tracks = points(&[(0.1, 0.1), (0.9, 0.9)]);
        let detections = points(&[(0.85, 0.9), (0.12, 0.1)]);

        let (matched, unmatched_detections, unmatched_tracks) =
            associate_detections_to_tracks(&tracks, &detections);

        assert_eq!(matched, vec![(1, 0), (0, 1)]);
        assert!(unmatched_detections.is_empty());
        assert!(unmatched_tracks.is_empty());
    }

    #[test]
    fn test_closest_track_claims_contested_detection() {
        // both tracks are nearest to detection 0; track 1 is closer and wins it
        let tracks = points(&[(0.3, 0.5), (0.45, 0.5)]);
        let detections = points(&[(0.5, 0.5), (0.9, 0.9)]);

        let (matched, unmatched_detections, unmatched_tracks) =
            associate_detections_to_tracks(&tracks, &detections);

        assert_eq!(matched, vec![(0, 1)]);
        assert_eq!(unmatched_detections, vec![1]);
        assert_eq!(unmatched_tracks, vec![0]);
    }

    #[test]
    fn test_more_detections_than_tracks() {
        let tracks = points(&[(0.5, 0.5)]);
        let detections = points(&[(0.1, 0.1), (0.52, 0.5), (0.9, 0.9)]);

        let (matched, unmatched_detections, unmatched_tracks) =
            associate_detections_to_tracks(&tracks, &detections);

        assert_eq!(matched, vec![(1, 0)]);
        assert_eq!(unmatched_detections, vec![0, 2]);
        assert!(unmatched_tracks.is_empty());
    }

    #[test]
    fn test_empty_side_leaves_everything_unmatched() {
        let tracks = points(&[(0.5, 0.5)]);

        let (matched, unmatched_detections, unmatched_tracks) =
            associate_detections_to_tracks(&tracks, &[]);

        assert!(matched.is_empty());
        assert!(unmatched_detections.is_empty());
        assert_eq!(unmatched_tracks, vec![0]);
    }

    #[test]
    fn test_equidistant_detections_resolve_to_first_column() {
        let tracks = points(&[(0.5, 0.5)]);
        let detections = points(&[(0.25, 0.5), (0.75, 0.5)]);

        let (matched, _, _) = associate_detections_to_tracks(&tracks, &detections);

        assert_eq!(matched, vec![(0, 0)]);
    }
}
