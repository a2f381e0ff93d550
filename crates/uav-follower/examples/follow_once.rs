//! Run the pipeline once over a synthetic batch.
//!
//! Stands in every collaborator: a single-pass nearest-seed solver for the
//! clustering engine, synthetic range frames for the depth service, and a
//! fixed pose for the transform service.

use std::str::FromStr;

use log::{info, warn, LevelFilter};
use nalgebra::Vector4;

use uav_follower::core::{init_with_level, Detection, DetectionBatch, RangeImage};
use uav_follower::nav::{BadDetectionSink, DepthSource, ServiceError, StaticPose};
use uav_follower::select::{ClusterSet, ClusterSolver};
use uav_follower::{FollowParams, FollowPipeline};

/// Nearest-seed assignment; the real deployment wires in the iterative
/// clustering engine here.
struct NearestSeed;

impl ClusterSolver for NearestSeed {
    fn solve(
        &self,
        points: &[Vector4<f64>],
        k: usize,
        seeds: &[Vector4<f64>],
        _tol: f64,
    ) -> ClusterSet {
        let mut members = vec![Vec::new(); k];
        for p in points {
            let nearest = seeds
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    (p - *a).norm_squared().total_cmp(&(p - *b).norm_squared())
                })
                .map(|(i, _)| i)
                .unwrap();
            members[nearest].push(*p);
        }
        let centroids = members
            .iter()
            .zip(seeds)
            .map(|(m, seed)| {
                if m.is_empty() {
                    *seed
                } else {
                    m.iter().fold(Vector4::zeros(), |acc, p| acc + p) / m.len() as f64
                }
            })
            .collect();
        ClusterSet { members, centroids }
    }
}

/// Depth service replaying frames with a 700 mm return inside the target
/// box and dead pixels elsewhere.
struct SyntheticDepth;

impl DepthSource for SyntheticDepth {
    fn request_frames(&mut self, count: usize) -> Result<Vec<RangeImage>, ServiceError> {
        let mut frame = RangeImage::filled(640, 480, 0);
        for y in 200..280 {
            for x in 290..350 {
                frame.data[y * 640 + x] = 700;
            }
        }
        Ok(vec![frame; count])
    }
}

struct LogSink;

impl BadDetectionSink for LogSink {
    fn notify(&mut self) {
        warn!("bad detection signalled");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_level = LevelFilter::from_str("debug").unwrap_or(LevelFilter::Info);
    init_with_level(log_level)?;

    let params: FollowParams = serde_json::from_str(
        r#"{
            "select": { "detect_thresh": 3, "density_ratio": 1.5, "max_accel": 5.0 },
            "depth_frames": 3,
            "follow_distance": 0.5,
            "frame_id": "map"
        }"#,
    )?;
    let pipeline = FollowPipeline::new(params, NearestSeed);

    // Five inference frames agreeing on one box, plus a stray box that gets
    // its own seed and is filtered out.
    let near = |dx: f64| Detection::from_xyxyn(0.44 + dx, 0.4, 0.56 + dx, 0.6);
    let batch = DetectionBatch::new(vec![
        vec![near(0.0)],
        vec![near(0.002)],
        vec![near(-0.002)],
        vec![near(0.004), Detection::from_xyxyn(0.05, 0.05, 0.1, 0.1)],
        vec![near(-0.004)],
    ]);

    let mut depth = SyntheticDepth;
    let mut pose = StaticPose::default();
    let mut sink = LogSink;

    match pipeline.process(&batch, &mut depth, &mut pose, &mut sink) {
        Ok(out) => {
            info!("target {:.3} m away", out.depth_m);
            info!(
                "goal ({:.3}, {:.3}, {:.3}) in frame {}",
                out.goal.pose.position.x,
                out.goal.pose.position.y,
                out.goal.pose.position.z,
                out.goal.frame_id
            );
        }
        Err(err) => warn!("batch skipped: {err}"),
    }

    Ok(())
}
