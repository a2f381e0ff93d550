//! Candidate selection for the uav-follower pipeline.
//!
//! Stages, in order:
//! 1. [`normalize_batch`] flattens per-frame detection arrays into one point
//!    set and derives the cluster count and seed centroids.
//! 2. The external clustering engine partitions the set (consumed through
//!    the [`ClusterSolver`] contract; not implemented here).
//! 3. [`filter_clusters`] rejects clusters unlikely to be real detections
//!    and computes an outlier-trimmed density for the rest.
//! 4. [`vote`] picks one winner among the surviving candidates.

mod density;
mod error;
mod normalize;
mod params;
mod solver;
mod vote;

pub use density::{filter_clusters, CandidateStats};
pub use error::SelectError;
pub use normalize::{normalize_batch, ClusteringInput};
pub use params::SelectParams;
pub use solver::{ClusterSet, ClusterSolver, CLUSTER_TOL};
pub use vote::vote;
