use log::info;
use nalgebra::Vector4;

use crate::{CandidateStats, SelectParams};

/// Pick the winning cluster among the surviving candidates.
///
/// Density dominance decides first: when the densest candidate beats the
/// runner-up by at least `density_ratio`, it wins outright. Otherwise the
/// higher point count of the two wins, with ties going to the density
/// leader. Returns `None` when nothing survived filtering; a lone survivor
/// wins unconditionally.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
pub fn vote(candidates: &[Option<CandidateStats>], params: &SelectParams) -> Option<Vector4<f64>> {
    let survivors: Vec<(usize, &CandidateStats)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(id, c)| c.as_ref().map(|stats| (id, stats)))
        .collect();

    match survivors.len() {
        0 => {
            info!("vote: no winner");
            None
        }
        1 => {
            let (id, stats) = survivors[0];
            info!("vote: winner is obvious; cluster {id}");
            Some(stats.centroid)
        }
        _ => Some(ranked_vote(&survivors, params)),
    }
}

fn ranked_vote(survivors: &[(usize, &CandidateStats)], params: &SelectParams) -> Vector4<f64> {
    let mut first = survivors[0];
    let mut second = survivors[0];

    for (pos, &entry) in survivors.iter().enumerate().skip(1) {
        let density = entry.1.point_density;
        if density > first.1.point_density {
            second = first;
            first = entry;
        } else if density > second.1.point_density {
            second = entry;
        } else if pos == 1 && first.0 == second.0 {
            // The second candidate compared still becomes the runner-up even
            // at equal density; collapsing both ranks onto one id would turn
            // the count comparison below into a self-tie.
            second = entry;
        }
    }

    if first.1.point_density / second.1.point_density >= params.density_ratio {
        info!("vote: winner decided by density; cluster {}", first.0);
        return first.1.centroid;
    }

    if first.1.point_count >= second.1.point_count {
        info!("vote: winner decided by point count; cluster {}", first.0);
        first.1.centroid
    } else {
        info!("vote: upset! winner decided by point count; cluster {}", second.0);
        second.1.centroid
    }
}
