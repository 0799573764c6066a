use std::collections::BTreeMap;

use log::{debug, trace};
use nalgebra::Vector2;

use crate::{associate::associate_detections_to_tracks, detection::DetectedObject};

pub const DEFAULT_MAX_DISAPPEARED: u32 = 5;

/// A detection carried across frames under a stable id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedObject {
    track_id: u64,
    object: DetectedObject,
    disappeared: u32,
}

impl TrackedObject {
    fn new(track_id: u64, object: DetectedObject) -> Self {
        Self {
            track_id,
            object,
            disappeared: 0,
        }
    }

    pub fn track_id(&self) -> u64 {
        self.track_id
    }

    pub fn object(&self) -> &DetectedObject {
        &self.object
    }

    /// Frames since this object was last matched to a detection.
    pub fn disappeared(&self) -> u32 {
        self.disappeared
    }

    fn center(&self) -> Vector2<f64> {
        self.object.centroid().center()
    }

    fn update(&mut self, object: DetectedObject) {
        self.object = object;
        self.disappeared = 0;
    }
}

/// Tracks objects between consecutive frames by nearest centroid.
///
/// An object that goes unmatched is kept for up to `max_disappeared` frames before it is
/// evicted. Each video stream needs its own tracker; ids are only unique per instance.
#[derive(Debug)]
pub struct CentroidTracker {
    objects: BTreeMap<u64, TrackedObject>,
    next_id: u64,
    max_disappeared: u32,
}

impl CentroidTracker {
    pub fn new(max_disappeared: u32) -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: 0,
            max_disappeared,
        }
    }

    pub fn max_disappeared(&self) -> u32 {
        self.max_disappeared
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The tracked objects ordered by ascending track id.
    pub fn get_tracked_objects(&self) -> Vec<TrackedObject> {
        self.objects.values().copied().collect()
    }

    /// Forgets every tracked object and restarts ids from zero.
    pub fn reset(&mut self) {
        self.objects.clear();
        self.next_id = 0;
    }

    pub fn update(&mut self, detections: &[DetectedObject]) -> Vec<TrackedObject> {
        if detections.is_empty() {
            let ids: Vec<u64> = self.objects.keys().copied().collect();
            ids.into_iter().for_each(|id| self.mark_disappeared(id));
            return self.get_tracked_objects();
        }

        if self.objects.is_empty() {
            detections.iter().for_each(|detection| self.register(*detection));
            return self.get_tracked_objects();
        }

        let ids: Vec<u64> = self.objects.keys().copied().collect();
        let track_centers: Vec<Vector2<f64>> =
            self.objects.values().map(TrackedObject::center).collect();
        let detection_centers: Vec<Vector2<f64>> = detections
            .iter()
            .map(|detection| detection.centroid().center())
            .collect();

        let (matched_indices, unmatched_detection_indices, unmatched_track_indices) =
            associate_detections_to_tracks(&track_centers, &detection_centers);

        for (detection_index, track_index) in matched_indices {
            if let Some(tracked) = self.objects.get_mut(&ids[track_index]) {
                tracked.update(detections[detection_index]);
            }
        }

        // With at least as many tracks as detections only the leftover tracks are aged,
        // otherwise only the leftover detections are registered.
        if ids.len() >= detections.len() {
            for track_index in unmatched_track_indices {
                self.mark_disappeared(ids[track_index]);
            }
            if !unmatched_detection_indices.is_empty() {
                debug!(
                    "{} detections lost their nearest track to a closer one and were not registered",
                    unmatched_detection_indices.len()
                );
            }
        } else {
            for detection_index in unmatched_detection_indices {
                self.register(detections[detection_index]);
            }
            if !unmatched_track_indices.is_empty() {
                debug!(
                    "{} tracks lost their nearest detection to a closer track and were not aged",
                    unmatched_track_indices.len()
                );
            }
        }

        self.get_tracked_objects()
    }

    fn register(&mut self, object: DetectedObject) {
        let id = self.next_id;
        self.next_id += 1;
        trace!("registered track {id}");
        self.objects.insert(id, TrackedObject::new(id, object));
    }

    fn mark_disappeared(&mut self, id: u64) {
        let Some(tracked) = self.objects.get_mut(&id) else {
            return;
        };
        tracked.disappeared += 1;
        if tracked.disappeared > self.max_disappeared {
            debug!(
                "evicting track {id} after {} frames without a match",
                tracked.disappeared
            );
            self.objects.remove(&id);
        }
    }
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISAPPEARED)
    }
}
