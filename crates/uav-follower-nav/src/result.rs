use uav_follower_core::{GoalPose, RangeImage, StampedPoint};

/// Output of one successfully processed detection batch.
#[derive(Clone, Debug)]
pub struct FollowOutput {
    /// Navigation goal in the configured output frame.
    pub goal: GoalPose,
    /// Estimated map-frame position of the target itself (diagnostic).
    pub target_position: StampedPoint,
    /// Validated target distance, meters (diagnostic).
    pub depth_m: f64,
    /// Averaged range image, when `keep_averaged_image` is set.
    pub averaged_range: Option<RangeImage>,
}
