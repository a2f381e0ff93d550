use nalgebra::Vector4;

use uav_follower_core::DetectionBatch;

use crate::SelectError;

/// Flattened clustering input derived from one detection batch.
#[derive(Clone, Debug, Default)]
pub struct ClusteringInput {
    /// All box vectors across the batch, in array-then-row order.
    pub points: Vec<Vector4<f64>>,
    /// Cluster count to request: the largest per-array detection count.
    pub k: usize,
    /// Seed centroids: the rows of the first array achieving `k`.
    pub seeds: Vec<Vector4<f64>>,
}

/// Flatten a batch into clustering input and seed parameters.
///
/// The array with the most rows seeds the clusters. Stray detections in the
/// batch then tend to claim a centroid of their own instead of polluting the
/// clusters that collect the consistent boxes. An empty batch yields
/// `k = 0`; the caller short-circuits before invoking the engine.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
pub fn normalize_batch(batch: &DetectionBatch) -> Result<ClusteringInput, SelectError> {
    let mut points = Vec::with_capacity(batch.total_detections());
    let mut k = 0usize;
    let mut seeds: Vec<Vector4<f64>> = Vec::new();

    for frame in &batch.frames {
        for det in frame {
            points.push(det.xyxyn);
        }
        if frame.len() > k {
            k = frame.len();
            seeds = frame.iter().map(|d| d.xyxyn).collect();
        }
    }

    // The seed array must supply exactly k centroids. Checked after the loop
    // no matter which path filled it.
    if seeds.len() != k {
        return Err(SelectError::ClusteringInputMismatch {
            k,
            seeds: seeds.len(),
        });
    }

    log::debug!("normalized {} points into k={k} clusters", points.len());
    Ok(ClusteringInput { points, k, seeds })
}
