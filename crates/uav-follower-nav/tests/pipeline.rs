use approx::assert_relative_eq;
use nalgebra::{Vector3, Vector4};

use uav_follower_core::{Detection, DetectionBatch, RangeImage};
use uav_follower_nav::{
    BadDetectionSink, DepthRejection, DepthSource, FollowError, FollowParams, FollowPipeline,
    PoseSource, ServiceError, StaticPose,
};
use uav_follower_select::{ClusterSet, ClusterSolver, SelectParams};

/// Single-pass nearest-seed assignment standing in for the external
/// clustering engine. Empty clusters keep their seed as centroid, matching
/// the engine contract.
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

struct FixedDepth {
    frame: RangeImage,
    calls: usize,
}

impl FixedDepth {
    fn filled(value: u16) -> Self {
        Self {
            frame: RangeImage::filled(640, 480, value),
            calls: 0,
        }
    }
}

impl DepthSource for FixedDepth {
    fn request_frames(&mut self, count: usize) -> Result<Vec<RangeImage>, ServiceError> {
        self.calls += 1;
        Ok(vec![self.frame.clone(); count])
    }
}

struct FailingPose;

impl PoseSource for FailingPose {
    fn current_pose(&mut self) -> Result<uav_follower_core::Pose, ServiceError> {
        Err(ServiceError::Unavailable("tf2 timeout".into()))
    }
}

#[derive(Default)]
struct NotifyCounter(usize);

impl BadDetectionSink for NotifyCounter {
    fn notify(&mut self) {
        self.0 += 1;
    }
}

fn params(detect_thresh: usize) -> FollowParams {
    FollowParams {
        select: SelectParams {
            detect_thresh,
            ..SelectParams::default()
        },
        depth_frames: 3,
        follow_distance: 0.5,
        ..FollowParams::default()
    }
}

/// Box centered on the principal point. Dyadic coordinates keep the pixel
/// scaling exact.
fn centered_detection() -> Detection {
    Detection::from_xyxyn(0.4375, 0.375, 0.5625, 0.625)
}

#[test]
fn end_to_end_single_detection_matches_closed_form() {
    let pipeline = FollowPipeline::new(params(1), NearestSeed);
    let batch = DetectionBatch::new(vec![vec![centered_detection()]]);

    let mut depth = FixedDepth::filled(800);
    let mut pose = StaticPose::default();
    let mut sink = NotifyCounter::default();

    let out = pipeline.process(&batch, &mut depth, &mut pose, &mut sink).unwrap();

    // On-axis target 0.8 m ahead, 0.5 m standoff: the goal sits 0.3 m out
    // with the orientation unchanged.
    assert_relative_eq!(out.depth_m, 0.8, epsilon = 1e-12);
    assert_relative_eq!(
        out.goal.pose.position,
        Vector3::new(0.3, 0.0, 0.0),
        epsilon = 1e-9
    );
    assert_relative_eq!(out.goal.pose.orientation.angle(), 0.0, epsilon = 1e-9);
    assert_relative_eq!(
        out.target_position.point,
        Vector3::new(0.8, 0.0, 0.0),
        epsilon = 1e-9
    );
    assert_eq!(out.goal.frame_id, "map");
    assert_eq!(sink.0, 0);
    assert_eq!(depth.calls, 1);
    assert!(out.averaged_range.is_none());
}

#[test]
fn empty_batch_notifies_once_without_touching_collaborators() {
    let pipeline = FollowPipeline::new(params(1), NearestSeed);
    let batch = DetectionBatch::default();

    let mut depth = FixedDepth::filled(800);
    let mut pose = StaticPose::default();
    let mut sink = NotifyCounter::default();

    let err = pipeline
        .process(&batch, &mut depth, &mut pose, &mut sink)
        .unwrap_err();

    assert!(matches!(err, FollowError::NoDetections));
    assert_eq!(sink.0, 1);
    assert_eq!(depth.calls, 0);
}

#[test]
fn stray_seed_is_filtered_and_the_dense_cluster_wins() {
    // Five frames agree on one box; one frame adds a stray second box that
    // becomes its own seed. The stray cluster fails the count floor and the
    // winner is the dense centroid.
    // Dyadic offsets cancel exactly in the centroid mean.
    let near = |dx: f64| Detection::from_xyxyn(0.4375 + dx, 0.375, 0.5625 + dx, 0.625);
    let stray = Detection::from_xyxyn(0.046875, 0.046875, 0.09375, 0.09375);

    let batch = DetectionBatch::new(vec![
        vec![near(0.0)],
        vec![near(0.001953125)],
        vec![near(-0.001953125)],
        vec![near(0.00390625), stray],
        vec![near(-0.00390625)],
    ]);

    let pipeline = FollowPipeline::new(params(3), NearestSeed);
    let mut depth = FixedDepth::filled(800);
    let mut pose = StaticPose::default();
    let mut sink = NotifyCounter::default();

    let out = pipeline.process(&batch, &mut depth, &mut pose, &mut sink).unwrap();

    // The five near boxes average back onto the principal point.
    assert_relative_eq!(
        out.goal.pose.position,
        Vector3::new(0.3, 0.0, 0.0),
        epsilon = 1e-6
    );
    assert_eq!(sink.0, 0);
}

#[test]
fn dead_depth_region_is_a_bad_detection() {
    let pipeline = FollowPipeline::new(params(1), NearestSeed);
    let batch = DetectionBatch::new(vec![vec![centered_detection()]]);

    let mut depth = FixedDepth::filled(0);
    let mut pose = StaticPose::default();
    let mut sink = NotifyCounter::default();

    let err = pipeline
        .process(&batch, &mut depth, &mut pose, &mut sink)
        .unwrap_err();

    assert!(matches!(
        err,
        FollowError::InvalidDepth {
            reason: DepthRejection::NoValidPixels
        }
    ));
    assert_eq!(sink.0, 1);
}

#[test]
fn pose_failure_is_a_bad_detection() {
    let pipeline = FollowPipeline::new(params(1), NearestSeed);
    let batch = DetectionBatch::new(vec![vec![centered_detection()]]);

    let mut depth = FixedDepth::filled(800);
    let mut pose = FailingPose;
    let mut sink = NotifyCounter::default();

    let err = pipeline
        .process(&batch, &mut depth, &mut pose, &mut sink)
        .unwrap_err();

    assert!(matches!(err, FollowError::TransformUnavailable));
    assert_eq!(sink.0, 1);
}

#[test]
fn out_of_range_depth_is_a_bad_detection() {
    let pipeline = FollowPipeline::new(params(1), NearestSeed);
    let batch = DetectionBatch::new(vec![vec![centered_detection()]]);

    let mut depth = FixedDepth::filled(1500);
    let mut pose = StaticPose::default();
    let mut sink = NotifyCounter::default();

    let err = pipeline
        .process(&batch, &mut depth, &mut pose, &mut sink)
        .unwrap_err();

    assert!(matches!(
        err,
        FollowError::InvalidDepth {
            reason: DepthRejection::OutOfRange
        }
    ));
    assert_eq!(sink.0, 1);
}
