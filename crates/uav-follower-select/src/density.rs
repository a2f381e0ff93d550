use std::f64::consts::PI;

use log::debug;
use nalgebra::Vector4;

use crate::{ClusterSet, SelectParams};

/// Statistics of a cluster that survived filtering.
#[derive(Clone, Debug)]
pub struct CandidateStats {
    pub centroid: Vector4<f64>,
    pub point_count: usize,
    /// Points per unit area of the trimmed enclosing circle.
    pub point_density: f64,
}

/// Discard clusters unlikely to be real detections and compute an
/// outlier-trimmed density for the rest.
///
/// Sorted centroid distances of a cohesive cluster grow near-linearly; a
/// jump in their second difference marks where sparse stray points begin,
/// so trimming the radius there keeps a few outliers from deflating the
/// density without a fixed distance cutoff.
///
/// The output is indexed by cluster id; rejected ids hold `None`.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
pub fn filter_clusters(
    clusters: &ClusterSet,
    params: &SelectParams,
) -> Vec<Option<CandidateStats>> {
    let min_count = params.min_point_count();
    let mut out = Vec::with_capacity(clusters.len());

    for (id, (members, centroid)) in clusters
        .members
        .iter()
        .zip(&clusters.centroids)
        .enumerate()
    {
        let point_count = members.len();
        if point_count < min_count {
            out.push(None);
            continue;
        }

        let mut distances: Vec<f64> = members.iter().map(|p| (p - centroid).norm()).collect();
        distances.sort_by(f64::total_cmp);

        let radius = trimmed_radius(&distances, params.max_accel);
        let point_density = point_count as f64 / (PI * radius * radius);
        debug!("cluster {id}: {point_count} pts, r={radius:.4}, density={point_density:.2}");

        out.push(Some(CandidateStats {
            centroid: *centroid,
            point_count,
            point_density,
        }));
    }

    out
}

/// Radius of the enclosing circle around the centroid.
///
/// When the largest second difference of the sorted distances exceeds
/// `max_accel`, the distance at that index becomes the radius; otherwise the
/// maximum raw distance is used. Fewer than three members yield no second
/// differences and fall through to the raw maximum.
fn trimmed_radius(distances: &[f64], max_accel: f64) -> f64 {
    let accel: Vec<f64> = distances
        .windows(3)
        .map(|w| (w[2] - w[1]) - (w[1] - w[0]))
        .collect();

    // First occurrence of the maximum, as ties go to the earliest boundary.
    let mut peak: Option<(usize, f64)> = None;
    for (i, &a) in accel.iter().enumerate() {
        if peak.is_none_or(|(_, best)| a > best) {
            peak = Some((i, a));
        }
    }

    match peak {
        Some((idx, a)) if a > max_accel => distances[idx],
        _ => distances.last().copied().unwrap_or(0.0),
    }
}
