use serde::{Deserialize, Serialize};

use uav_follower_core::CameraIntrinsics;
use uav_follower_select::SelectParams;

/// Static configuration for the follower pipeline, read once at startup.
///
/// Loading from a file is the embedder's concern; the struct round-trips
/// through serde.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FollowParams {
    /// Candidate-selection thresholds.
    #[serde(default)]
    pub select: SelectParams,
    /// Intrinsics of the depth-aligned camera.
    #[serde(default)]
    pub camera: CameraIntrinsics,
    /// Range frames averaged per depth estimate.
    pub depth_frames: usize,
    /// Standoff kept between the robot and the target, meters.
    pub follow_distance: f64,
    /// Frame id stamped on published goals.
    pub frame_id: String,
    /// Read the averaged center pixel when the inset box region is empty or
    /// out of image bounds, instead of failing the batch.
    #[serde(default)]
    pub center_pixel_fallback: bool,
    /// Carry the averaged range image in the output for diagnostics.
    #[serde(default)]
    pub keep_averaged_image: bool,
}

impl Default for FollowParams {
    fn default() -> Self {
        Self {
            select: SelectParams::default(),
            camera: CameraIntrinsics::default(),
            depth_frames: 3,
            follow_distance: 1.0,
            frame_id: "map".to_string(),
            center_pixel_fallback: false,
            keep_averaged_image: false,
        }
    }
}
