//! Collaborator contracts: depth frames, robot pose, bad-detection signal.
//!
//! All three are blocking round-trips. The handler suspends at each call and
//! resumes on the response, which serializes the pipeline per batch and
//! provides natural backpressure; timeouts belong to the transport layer.

use uav_follower_core::{Pose, RangeImage};

use crate::error::ServiceError;

/// Provider of raw range frames.
pub trait DepthSource {
    /// Request `count` frames. The reply must contain exactly `count` frames
    /// of identical dimensions.
    fn request_frames(&mut self, count: usize) -> Result<Vec<RangeImage>, ServiceError>;
}

/// Provider of the robot's current pose in the map frame.
pub trait PoseSource {
    fn current_pose(&mut self) -> Result<Pose, ServiceError>;
}

/// Fire-and-forget signal for unusable batches.
pub trait BadDetectionSink {
    fn notify(&mut self);
}

/// Pose source that always reports the same pose.
///
/// Stands in for the transform service on a bench rig where no localization
/// is running.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPose(pub Pose);

impl PoseSource for StaticPose {
    fn current_pose(&mut self) -> Result<Pose, ServiceError> {
        Ok(self.0)
    }
}
