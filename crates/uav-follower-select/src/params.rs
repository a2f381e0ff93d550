use serde::{Deserialize, Serialize};

/// Thresholds for candidate selection.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SelectParams {
    /// Upstream detection-count threshold. A cluster qualifies as a
    /// candidate when it holds at least `ceil(0.8 × detect_thresh)` points.
    pub detect_thresh: usize,
    /// First-to-second density ratio above which the densest candidate wins
    /// outright, regardless of point counts.
    pub density_ratio: f64,
    /// Bound on the second difference of sorted centroid distances. A jump
    /// above this marks where sparse stray points begin; the density radius
    /// is trimmed there.
    pub max_accel: f64,
}

impl Default for SelectParams {
    fn default() -> Self {
        Self {
            detect_thresh: 10,
            density_ratio: 1.5,
            max_accel: 5.0,
        }
    }
}

impl SelectParams {
    /// Minimum member count for a cluster to survive filtering.
    pub fn min_point_count(&self) -> usize {
        (0.8 * self.detect_thresh as f64).ceil() as usize
    }
}
