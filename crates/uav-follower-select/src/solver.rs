use nalgebra::Vector4;

/// Convergence tolerance handed to the clustering engine, in normalized
/// bounding-box units.
pub const CLUSTER_TOL: f64 = 0.05;

/// Partition of the flattened detection set, indexed by dense cluster id.
///
/// Invariant: `members.len() == centroids.len() == k`, ids dense in `[0, k)`.
#[derive(Clone, Debug, Default)]
pub struct ClusterSet {
    pub members: Vec<Vec<Vector4<f64>>>,
    pub centroids: Vec<Vector4<f64>>,
}

impl ClusterSet {
    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }
}

/// Contract for the external iterative clustering engine.
///
/// Given the flat point set, the cluster count `k`, `k` seed centroids, and
/// a convergence tolerance, the engine returns the final partition.
/// Requirements on implementations:
/// - return exactly `k` member lists and `k` centroids (empty clusters keep
///   their seed as centroid);
/// - every input point appears in exactly one member list;
/// - the result is deterministic for fixed inputs — seeding comes from
///   detection-derived centroids, never from random initialization.
pub trait ClusterSolver {
    fn solve(
        &self,
        points: &[Vector4<f64>],
        k: usize,
        seeds: &[Vector4<f64>],
        tol: f64,
    ) -> ClusterSet;
}
