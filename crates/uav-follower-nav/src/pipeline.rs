//! Per-batch orchestration: normalize → cluster → filter → vote → depth →
//! transform, short-circuiting to the bad-detection signal on failure.

use std::time::SystemTime;

use log::{error, info, warn};

use uav_follower_core::{DetectionBatch, GoalPose, StampedPoint};
use uav_follower_select::{filter_clusters, normalize_batch, vote, ClusterSolver, CLUSTER_TOL};

use crate::depth::{estimate_depth, PixelBox};
use crate::error::FollowError;
use crate::params::FollowParams;
use crate::result::FollowOutput;
use crate::services::{BadDetectionSink, DepthSource, PoseSource};
use crate::transform::goal_from_target;

/// Sequential per-batch pipeline.
///
/// Batches are handled to completion, one in flight: every collaborator call
/// is a blocking round-trip, so a slow service delays rather than corrupts
/// subsequent processing. Clustering state and all intermediate values are
/// built fresh per call; only the parameters and the solver handle persist.
pub struct FollowPipeline<S: ClusterSolver> {
    params: FollowParams,
    solver: S,
}

impl<S: ClusterSolver> FollowPipeline<S> {
    pub fn new(params: FollowParams, solver: S) -> Self {
        Self { params, solver }
    }

    pub fn params(&self) -> &FollowParams {
        &self.params
    }

    /// Process one detection batch to completion.
    ///
    /// Any bad-detection condition signals `notifier` exactly once and
    /// returns the error without producing a goal; the producer decides
    /// whether to resend. An internal consistency failure aborts the batch
    /// without the signal — it marks a logic bug, not a data condition.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip_all))]
    pub fn process(
        &self,
        batch: &DetectionBatch,
        depth: &mut dyn DepthSource,
        pose: &mut dyn PoseSource,
        notifier: &mut dyn BadDetectionSink,
    ) -> Result<FollowOutput, FollowError> {
        match self.run(batch, depth, pose) {
            Ok(out) => Ok(out),
            Err(err) if err.is_bad_detection() => {
                warn!("bad detection: {err}");
                notifier.notify();
                Err(err)
            }
            Err(err) => {
                error!("aborting batch: {err}");
                Err(err)
            }
        }
    }

    fn run(
        &self,
        batch: &DetectionBatch,
        depth: &mut dyn DepthSource,
        pose: &mut dyn PoseSource,
    ) -> Result<FollowOutput, FollowError> {
        let input = normalize_batch(batch)?;
        if input.k == 0 {
            return Err(FollowError::NoDetections);
        }

        // Clustering state lives only for this batch.
        let clusters = self
            .solver
            .solve(&input.points, input.k, &input.seeds, CLUSTER_TOL);
        let candidates = filter_clusters(&clusters, &self.params.select);
        let winner =
            vote(&candidates, &self.params.select).ok_or(FollowError::InsufficientCandidates)?;

        let bbox = PixelBox::from_normalized(&winner, &self.params.camera);
        let estimate = estimate_depth(&bbox, depth, &self.params)?;

        let robot = pose
            .current_pose()
            .map_err(|_| FollowError::TransformUnavailable)?;
        let transform = goal_from_target(
            &self.params.camera,
            bbox.center(),
            estimate.depth_m,
            &robot,
            self.params.follow_distance,
        )?;

        let stamp = SystemTime::now();
        info!(
            "goal at ({:.3}, {:.3}, {:.3}), target at ({:.3}, {:.3}, {:.3})",
            transform.goal.position.x,
            transform.goal.position.y,
            transform.goal.position.z,
            transform.target_position.x,
            transform.target_position.y,
            transform.target_position.z
        );

        Ok(FollowOutput {
            goal: GoalPose {
                frame_id: self.params.frame_id.clone(),
                stamp,
                pose: transform.goal,
            },
            target_position: StampedPoint {
                frame_id: self.params.frame_id.clone(),
                stamp,
                point: transform.target_position,
            },
            depth_m: estimate.depth_m,
            averaged_range: estimate.averaged,
        })
    }
}
