//! Core types and geometry for the uav-follower pipeline.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on the transport layer or on any collaborator service.

mod camera;
mod detection;
mod logger;
mod pose;
mod range_image;

pub use camera::{camera_mount_rotation, heading_quaternion, CameraIntrinsics};
pub use detection::{Detection, DetectionBatch, DETECTION_ROW_LEN};
pub use pose::{GoalPose, Pose, StampedPoint, StampedPose};
pub use range_image::{RangeImage, RangeImageView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
